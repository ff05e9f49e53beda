//! 语言偏好存储
//!
//! 按文档ID记住读者选择的目标语言，下次打开同一文档时恢复。
//! 默认提供内存实现和JSON文件实现。

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::core::ReaderError;

/// 按文档记忆目标语言的存储能力
pub trait PreferenceStore: Send + Sync {
    /// 查询文档的目标语言，没有记录时返回None
    fn language_for(&self, document_id: &str) -> Option<String>;

    /// 记录文档的目标语言
    fn set_language(&self, document_id: &str, language: &str) -> Result<(), ReaderError>;
}

/// 内存偏好存储，进程退出即丢失
#[derive(Default)]
pub struct MemoryPreferenceStore {
    languages: RwLock<HashMap<String, String>>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn language_for(&self, document_id: &str) -> Option<String> {
        self.languages.read().unwrap().get(document_id).cloned()
    }

    fn set_language(&self, document_id: &str, language: &str) -> Result<(), ReaderError> {
        self.languages
            .write()
            .unwrap()
            .insert(document_id.to_string(), language.to_string());
        Ok(())
    }
}

/// JSON文件偏好存储
///
/// 每次写入都整体重写文件，偏好数据量小，不值得做增量。
pub struct JsonFilePreferenceStore {
    path: PathBuf,
    languages: RwLock<HashMap<String, String>>,
}

impl JsonFilePreferenceStore {
    /// 打开或创建偏好文件，路径支持 `~` 展开
    pub fn open(path: &str) -> Result<Self, ReaderError> {
        let expanded = shellexpand::tilde(path);
        let path = PathBuf::from(expanded.as_ref());

        let languages = if path.exists() {
            let content = std::fs::read_to_string(&path)
                .map_err(|e| ReaderError::new(&format!("读取偏好文件失败: {}", e)))?;
            serde_json::from_str(&content)
                .map_err(|e| ReaderError::new(&format!("解析偏好文件失败: {}", e)))?
        } else {
            HashMap::new()
        };

        Ok(Self {
            path,
            languages: RwLock::new(languages),
        })
    }

    fn persist(&self, languages: &HashMap<String, String>) -> Result<(), ReaderError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| ReaderError::new(&format!("创建偏好目录失败: {}", e)))?;
            }
        }
        let content = serde_json::to_string_pretty(languages)
            .map_err(|e| ReaderError::new(&format!("序列化偏好失败: {}", e)))?;
        std::fs::write(&self.path, content)
            .map_err(|e| ReaderError::new(&format!("写入偏好文件失败: {}", e)))?;
        Ok(())
    }
}

impl PreferenceStore for JsonFilePreferenceStore {
    fn language_for(&self, document_id: &str) -> Option<String> {
        self.languages.read().unwrap().get(document_id).cloned()
    }

    fn set_language(&self, document_id: &str, language: &str) -> Result<(), ReaderError> {
        let mut languages = self.languages.write().unwrap();
        languages.insert(document_id.to_string(), language.to_string());
        self.persist(&languages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemoryPreferenceStore::new();
        assert!(store.language_for("doc-1").is_none());

        store.set_language("doc-1", "French").unwrap();
        assert_eq!(store.language_for("doc-1").as_deref(), Some("French"));
        assert!(store.language_for("doc-2").is_none());
    }

    #[test]
    fn test_memory_store_overwrites() {
        let store = MemoryPreferenceStore::new();
        store.set_language("doc-1", "French").unwrap();
        store.set_language("doc-1", "Spanish").unwrap();
        assert_eq!(store.language_for("doc-1").as_deref(), Some("Spanish"));
    }

    #[test]
    fn test_json_store_persists_across_opens() {
        let dir = std::env::temp_dir().join(format!("lingreader-prefs-{}", std::process::id()));
        let path = dir.join("prefs.json");
        let path_str = path.to_str().unwrap().to_string();

        {
            let store = JsonFilePreferenceStore::open(&path_str).unwrap();
            store.set_language("doc-1", "German").unwrap();
        }

        let reopened = JsonFilePreferenceStore::open(&path_str).unwrap();
        assert_eq!(reopened.language_for("doc-1").as_deref(), Some("German"));

        let _ = std::fs::remove_dir_all(dir);
    }
}
