use crate::commands::Out;
use crate::model::{categories as menu, TransactionType};
use crate::Result;
use serde::Serialize;

/// The suggested categories for one transaction type.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryMenu {
    pub r#type: TransactionType,
    pub categories: Vec<String>,
}

/// Lists the suggested categories, for one type or for both.
pub fn categories(r#type: Option<TransactionType>) -> Result<Out<Vec<CategoryMenu>>> {
    let types = match r#type {
        Some(t) => vec![t],
        None => vec![TransactionType::Income, TransactionType::Expense],
    };
    let menus: Vec<CategoryMenu> = types
        .into_iter()
        .map(|t| CategoryMenu {
            r#type: t,
            categories: menu(t).iter().map(|c| c.to_string()).collect(),
        })
        .collect();
    let message = menus
        .iter()
        .map(|m| format!("{}: {}", m.r#type, m.categories.join(", ")))
        .collect::<Vec<_>>()
        .join("\n");
    Ok(Out::new(message, menus))
}

#[test]
fn test_categories() {
    let out = categories(Some(TransactionType::Income)).unwrap();
    assert!(out.message().starts_with("income: เงินเดือน, "));
    assert_eq!(out.structure().unwrap().len(), 1);

    let both = categories(None).unwrap();
    let lines: Vec<&str> = both.message().lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[1].starts_with("expense: อาหาร"));
}
