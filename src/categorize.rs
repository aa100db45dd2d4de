// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use regex::Regex;
use rusqlite::Connection;

use crate::error::Result;
use crate::models::{
    Category, CategoryType, Transaction, TransactionPatch, INVESTMENTS_CATEGORY, UNCATEGORIZED,
};
use crate::store::Ledger;

// first matching category wins
const BUILTIN_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "Food",
        &[
            "supermercado", "mercado", "padaria", "restaurante", "lanchonete", "ifood", "rappi",
            "hamburguer", "pizza", "delivery",
        ],
    ),
    (
        "Transport",
        &[
            "uber", "taxi", "combustível", "posto", "estacionamento", "metro", "onibus",
            "bilhete", "passagem", "pedágio",
        ],
    ),
    (
        "Housing",
        &[
            "aluguel", "condomínio", "luz", "água", "energia", "internet", "telefone", "gás",
            "eletropaulo", "sabesp",
        ],
    ),
    (
        "Leisure",
        &[
            "cinema", "netflix", "spotify", "shopping", "parque", "viagem", "hotel", "show",
            "teatro", "musical",
        ],
    ),
    (
        "Health",
        &[
            "farmacia", "drogaria", "médico", "hospital", "plano de saúde", "academia", "clinica",
            "dentista",
        ],
    ),
    (
        "Education",
        &[
            "escola", "faculdade", "curso", "livraria", "material escolar", "universidade",
            "mensalidade",
        ],
    ),
    (
        INVESTMENTS_CATEGORY,
        &[
            "rendimento", "dividendo", "aplicação", "tesouro", "ação", "fii", "investimento",
            "cdb", "lci",
        ],
    ),
    (
        "Income",
        &["salário", "pagamento", "transferência recebida", "depósito"],
    ),
];

#[derive(Debug, Clone)]
pub struct Rule {
    pub pattern: Regex,
    pub category: String,
}

#[derive(Debug, Clone, Default)]
pub struct Categorizer {
    rules: Vec<Rule>,
}

impl Categorizer {
    pub fn builtin() -> Self {
        let rules = BUILTIN_KEYWORDS
            .iter()
            .filter_map(|(category, words)| {
                let alternation = words
                    .iter()
                    .map(|w| regex::escape(w))
                    .collect::<Vec<_>>()
                    .join("|");
                // leading boundary: "ação" must not fire inside "alimentação"
                let pattern = Regex::new(&format!(r"(?i)\b(?:{})", alternation)).ok()?;
                Some(Rule {
                    pattern,
                    category: (*category).to_string(),
                })
            })
            .collect();
        Categorizer { rules }
    }

    pub fn load(conn: &Connection) -> Result<Self> {
        let mut stmt = conn.prepare("SELECT pattern, category FROM rules ORDER BY id DESC")?;
        let mut cur = stmt.query([])?;
        let mut rules = Vec::new();
        while let Some(r) = cur.next()? {
            let pat: String = r.get(0)?;
            let category: String = r.get(1)?;
            match Regex::new(&pat) {
                Ok(pattern) => rules.push(Rule { pattern, category }),
                Err(err) => tracing::warn!(pattern = %pat, %err, "ignoring invalid stored rule"),
            }
        }
        rules.extend(Categorizer::builtin().rules);
        Ok(Categorizer { rules })
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn categorize(&self, description: &str) -> Option<&str> {
        self.rules
            .iter()
            .find(|r| r.pattern.is_match(description))
            .map(|r| r.category.as_str())
    }
}

pub fn resolve_category<'a>(txn: &Transaction, categories: &'a [Category]) -> Option<&'a Category> {
    let name = txn.category.as_deref()?;
    categories.iter().find(|c| c.name == name)
}

pub fn display_category<'a>(txn: &Transaction, categories: &'a [Category]) -> &'a str {
    resolve_category(txn, categories)
        .map(|c| c.name.as_str())
        .unwrap_or(UNCATEGORIZED)
}

fn is_investment_category(name: &str, categories: &[Category]) -> bool {
    match categories.iter().find(|c| c.name == name) {
        Some(c) => c.kind == CategoryType::Investment,
        None => name == INVESTMENTS_CATEGORY,
    }
}

pub fn category_patch(category: Option<String>, categories: &[Category]) -> TransactionPatch {
    let investment = category
        .as_deref()
        .is_some_and(|name| is_investment_category(name, categories));
    TransactionPatch {
        investment: Some(investment),
        ..TransactionPatch::category(category)
    }
}

pub fn recategorize<L>(ledger: &L, categorizer: &Categorizer) -> Result<usize>
where
    L: Ledger + ?Sized,
{
    let categories = ledger.list_categories()?;
    let transactions = ledger.list_transactions()?;
    let mut updated = 0usize;
    for txn in &transactions {
        if resolve_category(txn, &categories).is_some() {
            continue;
        }
        let Some(found) = categorizer.categorize(&txn.description) else {
            continue;
        };
        if txn.category.as_deref() == Some(found) {
            continue;
        }
        let mut patch = category_patch(Some(found.to_string()), &categories);
        // keyword matches only ever add the flag
        patch.investment = patch.investment.filter(|on| *on);
        ledger.update_transaction(txn.id, &patch)?;
        tracing::debug!(id = txn.id, category = found, "recategorized transaction");
        updated += 1;
    }
    tracing::info!(updated, "recategorization finished");
    Ok(updated)
}
