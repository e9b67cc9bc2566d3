use serde::{Deserialize, Serialize};

/// Выбранное значение характеристики: пара "имя характеристики — опция".
///
/// В массиве `characteristics` товара пара хранится в кодированном виде
/// `"имя:опция"`; типизированная пара живёт только внутри программы.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Selection {
    pub name: String,
    pub option: String,
}

impl Selection {
    pub fn new(name: impl Into<String>, option: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            option: option.into(),
        }
    }

    /// Кодированная форма для хранения в товаре.
    pub fn encode(&self) -> String {
        format!("{}:{}", self.name, self.option)
    }

    /// Разбор кодированной формы. Строка без `:` — голая метка, не пара.
    /// Двоеточия после первого остаются частью опции.
    pub fn parse(raw: &str) -> Option<Self> {
        let (name, option) = raw.split_once(':')?;
        Some(Self::new(name, option))
    }

    pub fn belongs_to(&self, characteristic: &str) -> bool {
        self.name == characteristic
    }
}

impl std::fmt::Display for Selection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.name, self.option)
    }
}

/// Отображаемая часть записи характеристики: для пары `"имя:опция"` —
/// опция, для голой метки — сама метка.
pub fn display_label(raw: &str) -> &str {
    match raw.split_once(':') {
        Some((_, option)) => option,
        None => raw,
    }
}
