//! Форматирование цен для таблиц

/// Форматирует цену в аргентинском денежном стиле: точка как разделитель
/// тысяч, запятая перед сентаво. Целые суммы выводятся без дробной части.
///
/// # Примеры
///
/// ```
/// use frontend::shared::components::table::number_format::format_price;
///
/// assert_eq!(format_price(85000.0), "$ 85.000");
/// assert_eq!(format_price(99.5), "$ 99,50");
/// ```
pub fn format_price(value: f64) -> String {
    let negative = value < 0.0;
    // округляем до сентаво, дальше работаем с целыми
    let cents = (value.abs() * 100.0).round() as i64;
    let whole = cents / 100;
    let fraction = cents % 100;

    // разделитель тысяч — каждые 3 цифры с конца
    let digits = whole.to_string();
    let mut grouped = String::new();
    for (i, c) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }
    let grouped: String = grouped.chars().rev().collect();

    let sign = if negative { "-" } else { "" };
    if fraction == 0 {
        format!("{}$ {}", sign, grouped)
    } else {
        format!("{}$ {},{:02}", sign, grouped, fraction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_amounts_have_no_decimals() {
        assert_eq!(format_price(85000.0), "$ 85.000");
        assert_eq!(format_price(8900.0), "$ 8.900");
        assert_eq!(format_price(0.0), "$ 0");
        assert_eq!(format_price(137500.0), "$ 137.500");
    }

    #[test]
    fn test_fractional_amounts_use_comma() {
        assert_eq!(format_price(99.5), "$ 99,50");
        assert_eq!(format_price(1234567.89), "$ 1.234.567,89");
    }

    #[test]
    fn test_negative_amounts() {
        assert_eq!(format_price(-500.0), "-$ 500");
        assert_eq!(format_price(-1234.56), "-$ 1.234,56");
    }
}
