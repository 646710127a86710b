//! Demo catalog: one branch per city and a handful of products.
//!
//! Seeding only happens when the `products` table is empty, so restarting
//! against a file database never duplicates rows.

use sqlx::SqlitePool;

use bazaar_core::BranchId;

use super::RepositoryError;

const OPENING_HOURS: &str = "8:00 AM - 10:00 PM";

/// `(city, branch name)` in insertion order.
const BRANCHES: &[(&str, &str)] = &[
    ("Kabul", "Kabul Central"),
    ("Jalalabad", "Jalalabad Branch 1"),
    ("Kandahar", "Kandahar Branch 1"),
    ("Herat", "Herat Branch 1"),
    ("Balkh", "Balkh Branch 1"),
];

struct SeedProduct {
    name: &'static str,
    price: &'static str,
    category: &'static str,
    city: &'static str,
    stock: i64,
    description: &'static str,
}

const PRODUCTS: &[SeedProduct] = &[
    SeedProduct {
        name: "Afghan Rug",
        price: "49.99",
        category: "Home",
        city: "Kabul",
        stock: 12,
        description: "Hand-knotted wool rug",
    },
    SeedProduct {
        name: "Green Tea",
        price: "5.99",
        category: "Grocery",
        city: "Jalalabad",
        stock: 80,
        description: "Loose-leaf green tea with cardamom",
    },
    SeedProduct {
        name: "Traditional Hat",
        price: "12.99",
        category: "Clothing",
        city: "Kandahar",
        stock: 25,
        description: "Embroidered Kandahari cap",
    },
    SeedProduct {
        name: "Handcrafted Jewelry",
        price: "24.99",
        category: "Accessories",
        city: "Herat",
        stock: 15,
        description: "Silver and lapis lazuli pendant",
    },
    SeedProduct {
        name: "Dried Fruits",
        price: "8.99",
        category: "Grocery",
        city: "Balkh",
        stock: 60,
        description: "Mixed apricots, raisins and mulberries",
    },
];

/// What [`seed_catalog`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// The catalog already had products; nothing was written.
    AlreadySeeded,
    /// Rows were inserted.
    Seeded { branches: usize, products: usize },
}

/// Insert the demo catalog if no products exist yet.
///
/// All rows are written in one transaction.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if any statement fails; the
/// transaction is rolled back.
pub async fn seed_catalog(pool: &SqlitePool) -> Result<SeedOutcome, RepositoryError> {
    let mut tx = pool.begin().await?;

    let existing = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM products")
        .fetch_one(&mut *tx)
        .await?;
    if existing > 0 {
        return Ok(SeedOutcome::AlreadySeeded);
    }

    let mut branch_ids = Vec::with_capacity(BRANCHES.len());
    for (number, (city, name)) in BRANCHES.iter().enumerate() {
        let id = sqlx::query_scalar::<_, BranchId>(
            r"
            INSERT INTO branches (name, city, address, phone, hours)
            VALUES (?, ?, ?, ?, ?)
            RETURNING id
            ",
        )
        .bind(*name)
        .bind(*city)
        .bind(format!("Main Street 1, {city}"))
        .bind(format!("+93 70 000 00{:02}", number + 1))
        .bind(OPENING_HOURS)
        .fetch_one(&mut *tx)
        .await?;
        branch_ids.push((*city, id));
    }

    for product in PRODUCTS {
        let branch_id = branch_ids
            .iter()
            .find(|(city, _)| *city == product.city)
            .map(|(_, id)| *id);

        sqlx::query(
            r"
            INSERT INTO products (name, price, category, location, branch_id, stock, description)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            ",
        )
        .bind(product.name)
        .bind(product.price)
        .bind(product.category)
        .bind(product.city)
        .bind(branch_id)
        .bind(product.stock)
        .bind(product.description)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    tracing::info!(
        branches = BRANCHES.len(),
        products = PRODUCTS.len(),
        "Seeded demo catalog"
    );

    Ok(SeedOutcome::Seeded {
        branches: BRANCHES.len(),
        products: PRODUCTS.len(),
    })
}
