use serde::{Deserialize, Serialize};

/// Характеристика из общей библиотеки: имя и известные опции.
///
/// Опции хранятся в порядке добавления, без дубликатов.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharacteristicDef {
    pub name: String,
    #[serde(default)]
    pub options: Vec<String>,
}

impl CharacteristicDef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            options: Vec::new(),
        }
    }

    pub fn has_option(&self, option: &str) -> bool {
        self.options.iter().any(|o| o == option)
    }
}

/// Общая библиотека характеристик — словарь всех когда-либо созданных
/// имён характеристик и их опций.
///
/// Библиотека только растёт: записи и опции добавляются, но никогда не
/// удаляются, даже если ни один товар их больше не использует.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CharacteristicLibrary {
    entries: Vec<CharacteristicDef>,
}

impl CharacteristicLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[CharacteristicDef] {
        &self.entries
    }

    pub fn get(&self, name: &str) -> Option<&CharacteristicDef> {
        self.entries.iter().find(|e| e.name == name)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Регистрирует имя характеристики, если его ещё нет.
    /// Имя сравнивается с учётом регистра, после trim у вызывающего.
    /// Возвращает true, если запись была добавлена.
    pub fn ensure_entry(&mut self, name: &str) -> bool {
        if name.is_empty() || self.get(name).is_some() {
            return false;
        }
        self.entries.push(CharacteristicDef::new(name));
        true
    }

    /// Добавляет опцию к существующей записи. Повторное добавление —
    /// идемпотентный no-op. Возвращает true, если опция была добавлена.
    pub fn add_option(&mut self, name: &str, option: &str) -> bool {
        if option.is_empty() {
            return false;
        }
        match self.entries.iter_mut().find(|e| e.name == name) {
            Some(entry) if !entry.has_option(option) => {
                entry.options.push(option.to_string());
                true
            }
            _ => false,
        }
    }
}
