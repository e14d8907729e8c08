use crate::model::TransactionType;

/// Categories offered for income transactions.
pub const INCOME_CATEGORIES: &[&str] = &["เงินเดือน", "โบนัส", "งานเสริม", "ลงทุน", "อื่นๆ"];

/// Categories offered for expense transactions.
pub const EXPENSE_CATEGORIES: &[&str] = &[
    "อาหาร",
    "เดินทาง",
    "ที่พัก",
    "สาธารณูปโภค",
    "ช้อปปิ้ง",
    "สุขภาพ",
    "บันเทิง",
    "การศึกษา",
    "อื่นๆ",
];

/// The category menu for the given transaction type.
pub fn categories(r#type: TransactionType) -> &'static [&'static str] {
    match r#type {
        TransactionType::Income => INCOME_CATEGORIES,
        TransactionType::Expense => EXPENSE_CATEGORIES,
    }
}

/// Whether `category` is on the menu for `r#type`. Categories outside the menu are still
/// allowed, this is only used to warn about likely typos.
pub fn is_known_category(r#type: TransactionType, category: &str) -> bool {
    categories(r#type).contains(&category)
}
