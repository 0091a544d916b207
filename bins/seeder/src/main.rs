//! Database seeder for Centavo development and testing.
//!
//! Seeds demo ledger entries, spending limits, and shared expenses for
//! local development.
//!
//! Usage: cargo run --bin seeder

use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait};
use uuid::Uuid;

use centavo_core::ledger::{EntryDraft, EntryKind, ExtraFields};
use centavo_core::settlement::{Share, SharedExpenseDraft};
use centavo_core::spend_limit::{BlockRuleDraft, RuleScope};
use centavo_db::entities::{block_rules, entries, shared_expenses};
use centavo_db::repositories::block_rule::BlockRuleRepository;
use centavo_db::repositories::entry::EntryRepository;
use centavo_db::repositories::shared_expense::SharedExpenseRepository;
use centavo_shared::types::{ParticipantId, Period};

/// Demo payer ID (consistent for all seeds)
const PAYER_ID: &str = "00000000-0000-0000-0000-000000000001";
/// Demo partner ID (consistent for all seeds)
const PARTNER_ID: &str = "00000000-0000-0000-0000-000000000002";
/// Demo flatmate ID (consistent for all seeds)
const FLATMATE_ID: &str = "00000000-0000-0000-0000-000000000003";

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    println!("Connecting to database...");
    let db = centavo_db::connect(&database_url)
        .await
        .expect("Failed to connect to database");

    println!("Seeding ledger entries...");
    seed_entries(&db).await;

    println!("Seeding block rules...");
    seed_block_rules(&db).await;

    println!("Seeding shared expenses...");
    seed_shared_expenses(&db).await;

    println!("Seeding complete!");
}

fn participant(id: &str) -> ParticipantId {
    ParticipantId::from_uuid(Uuid::parse_str(id).unwrap())
}

/// Seeds three months of demo entries across a handful of categories.
async fn seed_entries(db: &DatabaseConnection) {
    // Skip if the ledger already has data
    let existing = entries::Entity::find().count(db).await.unwrap_or(0);
    if existing > 0 {
        println!("  Ledger already has {existing} entries, skipping...");
        return;
    }

    let repo = EntryRepository::new(db.clone());
    let today = Utc::now().date_naive();

    let rows: [(&str, Decimal, i64, EntryKind, &str, &str); 12] = [
        ("Monthly salary", dec!(4200.00), 2, EntryKind::Income, "Salary", "checking"),
        ("Weekly groceries", dec!(86.40), 3, EntryKind::Expense, "Food", "checking"),
        ("Streaming subscription", dec!(12.90), 5, EntryKind::Expense, "Entertainment", "credit-card"),
        ("Electricity bill", dec!(74.35), 8, EntryKind::Expense, "Utilities", "checking"),
        ("Transfer to savings", dec!(500.00), 10, EntryKind::Transfer, "Savings", "savings"),
        ("Restaurant dinner", dec!(58.00), 14, EntryKind::Expense, "Food", "credit-card"),
        ("Monthly salary", dec!(4200.00), 32, EntryKind::Income, "Salary", "checking"),
        ("Rent", dec!(1250.00), 33, EntryKind::Expense, "Rent", "checking"),
        ("Bus pass", dec!(49.00), 38, EntryKind::Expense, "Transport", "checking"),
        ("Weekly groceries", dec!(92.15), 41, EntryKind::Expense, "Food", "checking"),
        ("Monthly salary", dec!(4200.00), 63, EntryKind::Income, "Salary", "checking"),
        ("Rent", dec!(1250.00), 64, EntryKind::Expense, "Rent", "checking"),
    ];

    let mut inserted = 0;
    for (description, amount, days_ago, kind, category, account) in rows {
        let draft = EntryDraft {
            description: description.to_string(),
            amount,
            occurred_on: today - Duration::days(days_ago),
            kind,
            category: category.to_string(),
            account: account.to_string(),
            extra: None,
        };

        if let Err(e) = repo.create(draft).await {
            eprintln!("Failed to insert entry {description}: {e}");
        } else {
            inserted += 1;
        }
    }

    // One imported entry carrying bank metadata
    let mut extra = ExtraFields::new();
    extra.insert("bank_name", serde_json::json!("Banco Demo"));
    extra.insert("import_id", serde_json::json!("stmt-2026-0042"));
    let imported = EntryDraft {
        description: "Card payment POS 4412".to_string(),
        amount: dec!(33.75),
        occurred_on: today - Duration::days(6),
        kind: EntryKind::Expense,
        category: "Food".to_string(),
        account: "credit-card".to_string(),
        extra: Some(extra),
    };
    if let Err(e) = repo.create(imported).await {
        eprintln!("Failed to insert imported entry: {e}");
    } else {
        inserted += 1;
    }

    println!("  Inserted {inserted} entries");
}

/// Seeds spending limits for the current month.
async fn seed_block_rules(db: &DatabaseConnection) {
    let existing = block_rules::Entity::find().count(db).await.unwrap_or(0);
    if existing > 0 {
        println!("  Block rules already exist, skipping...");
        return;
    }

    let repo = BlockRuleRepository::new(db.clone());
    let period = Period::of(Utc::now().date_naive());

    let rules = [
        (RuleScope::Category, "Food", dec!(600.00)),
        (RuleScope::Category, "Entertainment", dec!(150.00)),
        (RuleScope::Account, "credit-card", dec!(1500.00)),
    ];

    let mut inserted = 0;
    for (scope, target, limit_amount) in rules {
        let draft = BlockRuleDraft {
            scope,
            target: target.to_string(),
            limit_amount,
            period,
            active: true,
        };

        if let Err(e) = repo.create(draft).await {
            eprintln!("Failed to insert block rule for {target}: {e}");
        } else {
            inserted += 1;
        }
    }

    println!("  Inserted {inserted} block rules for {period}");
}

/// Seeds shared expenses split between three demo participants.
async fn seed_shared_expenses(db: &DatabaseConnection) {
    let existing = shared_expenses::Entity::find().count(db).await.unwrap_or(0);
    if existing > 0 {
        println!("  Shared expenses already exist, skipping...");
        return;
    }

    let repo = SharedExpenseRepository::new(db.clone());
    let payer = participant(PAYER_ID);
    let partner = participant(PARTNER_ID);
    let flatmate = participant(FLATMATE_ID);

    let drafts = [
        SharedExpenseDraft {
            description: "Grocery run".to_string(),
            total_amount: dec!(120.00),
            payer,
            participants: vec![
                Share { participant: payer, amount: dec!(40.00) },
                Share { participant: partner, amount: dec!(40.00) },
                Share { participant: flatmate, amount: dec!(40.00) },
            ],
        },
        SharedExpenseDraft {
            description: "Internet bill".to_string(),
            total_amount: dec!(90.00),
            payer: partner,
            participants: vec![
                Share { participant: payer, amount: dec!(45.00) },
                Share { participant: flatmate, amount: dec!(45.00) },
            ],
        },
    ];

    let mut inserted = 0;
    for draft in drafts {
        let description = draft.description.clone();
        if let Err(e) = repo.create(draft).await {
            eprintln!("Failed to insert shared expense {description}: {e}");
        } else {
            inserted += 1;
        }
    }

    println!("  Inserted {inserted} shared expenses");
}
