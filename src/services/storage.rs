// src/services/storage.rs
//
// Armazenamento de blobs em disco local. Para o resto do sistema o blob é
// opaco: entra por bytes, sai por URL. Trocar por um bucket remoto muda só
// este arquivo.

use std::path::PathBuf;

use uuid::Uuid;

use crate::{common::error::AppError, models::document::FileType};

#[derive(Clone)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    // Garante que o diretório existe. Chamado uma vez na subida do app.
    pub async fn init(&self) -> Result<(), AppError> {
        tokio::fs::create_dir_all(&self.root).await?;
        Ok(())
    }

    fn path_for(&self, id: Uuid, file_type: FileType) -> PathBuf {
        self.root.join(format!("{}.{}", id, file_type.extension()))
    }

    // Grava o blob e devolve a URL pela qual ele será servido.
    pub async fn save(
        &self,
        id: Uuid,
        file_type: FileType,
        bytes: &[u8],
    ) -> Result<String, AppError> {
        tokio::fs::write(self.path_for(id, file_type), bytes).await?;
        Ok(format!("/api/documents/{id}/file"))
    }

    pub async fn load(&self, id: Uuid, file_type: FileType) -> Result<Vec<u8>, AppError> {
        let bytes = tokio::fs::read(self.path_for(id, file_type)).await?;
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Diretório descartável por teste, para não colidir entre execuções.
    fn temp_storage() -> FileStorage {
        let root = std::env::temp_dir().join(format!("docflow-storage-{}", Uuid::new_v4()));
        FileStorage::new(root)
    }

    #[tokio::test]
    async fn salvar_e_carregar_devolve_os_mesmos_bytes() {
        let storage = temp_storage();
        storage.init().await.unwrap();

        let id = Uuid::new_v4();
        let conteudo = b"%PDF-1.4 conteudo do contrato social".to_vec();

        storage.save(id, FileType::Pdf, &conteudo).await.unwrap();
        let lido = storage.load(id, FileType::Pdf).await.unwrap();

        assert_eq!(lido, conteudo);
    }

    #[tokio::test]
    async fn salvar_devolve_a_url_do_documento() {
        let storage = temp_storage();
        storage.init().await.unwrap();

        let id = Uuid::new_v4();
        let url = storage.save(id, FileType::Png, b"png").await.unwrap();

        assert_eq!(url, format!("/api/documents/{id}/file"));
    }

    #[tokio::test]
    async fn blob_e_gravado_como_id_ponto_extensao() {
        let storage = temp_storage();
        storage.init().await.unwrap();

        let id = Uuid::new_v4();
        storage.save(id, FileType::Jpg, b"jpg").await.unwrap();

        let esperado = storage.root.join(format!("{id}.jpg"));
        assert!(esperado.exists());
    }

    #[tokio::test]
    async fn carregar_blob_inexistente_falha() {
        let storage = temp_storage();
        storage.init().await.unwrap();

        let resultado = storage.load(Uuid::new_v4(), FileType::Pdf).await;
        assert!(matches!(resultado, Err(AppError::StorageError(_))));
    }
}
