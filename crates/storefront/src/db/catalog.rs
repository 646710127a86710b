//! Product and branch queries.
//!
//! Every read is a single statement, so a failure never yields partial
//! results. Queries are built at runtime with `QueryBuilder` because the set
//! of `WHERE` clauses depends on which filters are active.

use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use bazaar_core::{Branch, BranchId, NewProduct, Price, Product, ProductFilter, ProductId};

use super::RepositoryError;

const PRODUCT_SELECT: &str = r"
    SELECT p.id, p.name, p.price, p.category, p.location, p.branch_id,
           b.name AS branch_name, p.stock, p.description, p.rating
    FROM products p
    LEFT JOIN branches b ON b.id = p.branch_id
";

#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: ProductId,
    name: String,
    price: String,
    category: Option<String>,
    location: Option<String>,
    branch_id: Option<BranchId>,
    branch_name: Option<String>,
    stock: Option<i64>,
    description: Option<String>,
    rating: Option<f64>,
}

impl TryFrom<ProductRow> for Product {
    type Error = RepositoryError;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        let price = Price::parse(&row.price).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid price for product {}: {e}", row.id))
        })?;

        Ok(Self {
            id: row.id,
            name: row.name,
            price,
            category: row.category,
            location: row.location,
            branch_id: row.branch_id,
            branch_name: row.branch_name,
            stock: row.stock,
            description: row.description,
            rating: row.rating,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct BranchRow {
    id: BranchId,
    name: String,
    city: String,
    address: String,
    phone: Option<String>,
    hours: Option<String>,
}

impl From<BranchRow> for Branch {
    fn from(row: BranchRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            city: row.city,
            address: row.address,
            phone: row.phone,
            hours: row.hours,
        }
    }
}

/// Repository for catalog reads and product inserts.
pub struct CatalogRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> CatalogRepository<'a> {
    /// Create a new catalog repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List products matching every active filter, ordered by id.
    ///
    /// A branch filter that is not an integer cannot match any product and
    /// yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_products(
        &self,
        filter: &ProductFilter,
    ) -> Result<Vec<Product>, RepositoryError> {
        let branch_id = match filter.branch().map(|b| b.trim().parse::<i64>()) {
            Some(Ok(id)) => Some(BranchId::new(id)),
            Some(Err(_)) => return Ok(Vec::new()),
            None => None,
        };

        let mut query = QueryBuilder::<Sqlite>::new(PRODUCT_SELECT);
        query.push(" WHERE 1 = 1");
        if let Some(city) = filter.city() {
            query.push(" AND p.location = ").push_bind(city.to_owned());
        }
        if let Some(branch_id) = branch_id {
            query.push(" AND p.branch_id = ").push_bind(branch_id);
        }
        if let Some(category) = filter.category() {
            query.push(" AND p.category = ").push_bind(category.to_owned());
        }
        query.push(" ORDER BY p.id");

        let rows = query
            .build_query_as::<ProductRow>()
            .fetch_all(self.pool)
            .await?;

        rows.into_iter().map(Product::try_from).collect()
    }

    /// Get a single product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_product(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(&format!("{PRODUCT_SELECT} WHERE p.id = ?"))
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        row.map(Product::try_from).transpose()
    }

    /// Number of products in the catalog.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count_products(&self) -> Result<i64, RepositoryError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM products")
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }

    /// Distinct non-empty product categories, ascending.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn categories(&self) -> Result<Vec<String>, RepositoryError> {
        let categories = sqlx::query_scalar::<_, String>(
            r"
            SELECT DISTINCT category FROM products
            WHERE category IS NOT NULL AND category <> ''
            ORDER BY category
            ",
        )
        .fetch_all(self.pool)
        .await?;
        Ok(categories)
    }

    /// Distinct branch cities, ascending.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn cities(&self) -> Result<Vec<String>, RepositoryError> {
        let cities =
            sqlx::query_scalar::<_, String>("SELECT DISTINCT city FROM branches ORDER BY city")
                .fetch_all(self.pool)
                .await?;
        Ok(cities)
    }

    /// Branches, optionally restricted to one city, ordered by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn branches(&self, city: Option<&str>) -> Result<Vec<Branch>, RepositoryError> {
        let mut query =
            QueryBuilder::<Sqlite>::new("SELECT id, name, city, address, phone, hours FROM branches");
        if let Some(city) = city {
            query.push(" WHERE city = ").push_bind(city.to_owned());
        }
        query.push(" ORDER BY id");

        let rows = query
            .build_query_as::<BranchRow>()
            .fetch_all(self.pool)
            .await?;

        Ok(rows.into_iter().map(Branch::from).collect())
    }

    /// Append a product and return it with its assigned id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create_product(&self, product: &NewProduct) -> Result<Product, RepositoryError> {
        let id = sqlx::query_scalar::<_, ProductId>(
            r"
            INSERT INTO products (name, price, category, location, branch_id)
            VALUES (?, ?, ?, ?, ?)
            RETURNING id
            ",
        )
        .bind(&product.name)
        .bind(product.price.amount().to_string())
        .bind(&product.category)
        .bind(&product.location)
        .bind(product.branch_id)
        .fetch_one(self.pool)
        .await?;

        self.get_product(id).await?.ok_or_else(|| {
            RepositoryError::DataCorruption(format!("product {id} missing after insert"))
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::db::test_support;

    #[tokio::test]
    async fn test_unfiltered_lists_all_seeded_products() {
        let pool = test_support::pool(true).await;
        let repo = CatalogRepository::new(&pool);

        let products = repo.list_products(&ProductFilter::all()).await.unwrap();
        assert_eq!(products.len(), 5);
        assert_eq!(products[0].name, "Afghan Rug");
        assert_eq!(products[0].branch_name.as_deref(), Some("Kabul Central"));
        assert!(products.windows(2).all(|w| w[0].id < w[1].id));
    }

    #[tokio::test]
    async fn test_filter_by_city_returns_only_that_city() {
        let pool = test_support::pool(true).await;
        let repo = CatalogRepository::new(&pool);

        let products = repo
            .list_products(&ProductFilter::all().with_city("Kabul"))
            .await
            .unwrap();
        assert!(!products.is_empty());
        assert!(
            products
                .iter()
                .all(|p| p.location.as_deref() == Some("Kabul"))
        );
    }

    #[tokio::test]
    async fn test_filters_combine() {
        let pool = test_support::pool(true).await;
        let repo = CatalogRepository::new(&pool);

        let grocery = repo
            .list_products(&ProductFilter::all().with_category("Grocery"))
            .await
            .unwrap();
        assert_eq!(grocery.len(), 2);

        let grocery_in_balkh = repo
            .list_products(
                &ProductFilter::all()
                    .with_category("Grocery")
                    .with_city("Balkh"),
            )
            .await
            .unwrap();
        assert_eq!(grocery_in_balkh.len(), 1);
        assert_eq!(grocery_in_balkh[0].name, "Dried Fruits");
    }

    #[tokio::test]
    async fn test_filter_by_branch() {
        let pool = test_support::pool(true).await;
        let repo = CatalogRepository::new(&pool);

        let branches = repo.branches(Some("Herat")).await.unwrap();
        let herat = branches[0].id;

        let products = repo
            .list_products(&ProductFilter::all().with_branch(herat.to_string()))
            .await
            .unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].branch_id, Some(herat));

        let none = repo
            .list_products(&ProductFilter::all().with_branch("not-a-number"))
            .await
            .unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn test_no_match_is_empty_not_error() {
        let pool = test_support::pool(true).await;
        let repo = CatalogRepository::new(&pool);

        let products = repo
            .list_products(&ProductFilter::all().with_city("Atlantis"))
            .await
            .unwrap();
        assert!(products.is_empty());
    }

    #[tokio::test]
    async fn test_categories_and_cities_are_sorted_and_distinct() {
        let pool = test_support::pool(true).await;
        let repo = CatalogRepository::new(&pool);

        let categories = repo.categories().await.unwrap();
        assert_eq!(
            categories,
            vec!["Accessories", "Clothing", "Grocery", "Home"]
        );

        let cities = repo.cities().await.unwrap();
        assert_eq!(
            cities,
            vec!["Balkh", "Herat", "Jalalabad", "Kabul", "Kandahar"]
        );
    }

    #[tokio::test]
    async fn test_create_product_assigns_fresh_id() {
        let pool = test_support::pool(true).await;
        let repo = CatalogRepository::new(&pool);
        let before = repo.list_products(&ProductFilter::all()).await.unwrap();

        let created = repo
            .create_product(&NewProduct {
                name: "Saffron".into(),
                price: Price::parse("15.5").unwrap(),
                category: "Grocery".into(),
                location: "Herat".into(),
                branch_id: BranchId::new(4),
            })
            .await
            .unwrap();

        assert!(before.iter().all(|p| p.id != created.id));
        assert_eq!(created.price.to_string(), "15.50");
        assert_eq!(created.branch_name.as_deref(), Some("Herat Branch 1"));
        assert_eq!(repo.count_products().await.unwrap(), 6);
    }

    #[tokio::test]
    async fn test_create_product_with_unknown_branch_has_no_branch_name() {
        let pool = test_support::pool(false).await;
        let repo = CatalogRepository::new(&pool);

        let created = repo
            .create_product(&NewProduct {
                name: "Lapis Bead".into(),
                price: Price::from_cents(300),
                category: "Accessories".into(),
                location: "Kabul".into(),
                branch_id: BranchId::new(77),
            })
            .await
            .unwrap();

        assert_eq!(created.branch_id, Some(BranchId::new(77)));
        assert_eq!(created.branch_name, None);
    }
}
