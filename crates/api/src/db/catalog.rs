//! Catalog repository: categories, dessert items, testimonials, and chef
//! recommendations.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use sqlx::types::Json;

use sweet_dessert_core::{CategoryId, DessertItemId, Money, RecommendationId, TestimonialId};

use super::RepositoryError;
use crate::models::catalog::{Category, ChefRecommendation, DessertItem, Testimonial};

// =============================================================================
// Internal Row Types
// =============================================================================

#[derive(Debug, sqlx::FromRow)]
struct CategoryRow {
    id: i32,
    name: String,
    slug: String,
    description: String,
    image: String,
    display_order: i32,
    product_count: i64,
    created_at: DateTime<Utc>,
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Self {
            id: CategoryId::new(row.id),
            name: row.name,
            slug: row.slug,
            description: row.description,
            image: row.image,
            display_order: row.display_order,
            product_count: row.product_count,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct DessertRow {
    id: i32,
    name: String,
    slug: String,
    description: String,
    price: Money,
    category_id: i32,
    category_name: String,
    image: String,
    rating: rust_decimal::Decimal,
    reviews_count: i32,
    dietary_info: Json<Vec<String>>,
    ingredients: Json<Vec<String>>,
    allergens: Json<Vec<String>>,
    preparation_minutes: i32,
    featured: bool,
    seasonal: bool,
    best_seller: bool,
    available: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<DessertRow> for DessertItem {
    fn from(row: DessertRow) -> Self {
        Self {
            id: DessertItemId::new(row.id),
            name: row.name,
            slug: row.slug,
            description: row.description,
            price: row.price,
            category_id: CategoryId::new(row.category_id),
            category_name: row.category_name,
            image: row.image,
            rating: row.rating,
            reviews_count: row.reviews_count,
            dietary_info: row.dietary_info.0,
            ingredients: row.ingredients.0,
            allergens: row.allergens.0,
            preparation_minutes: row.preparation_minutes,
            featured: row.featured,
            seasonal: row.seasonal,
            best_seller: row.best_seller,
            available: row.available,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct TestimonialRow {
    id: i32,
    name: String,
    avatar: String,
    rating: i32,
    text: String,
    dessert_item_id: Option<i32>,
    approved: bool,
    created_at: DateTime<Utc>,
}

impl From<TestimonialRow> for Testimonial {
    fn from(row: TestimonialRow) -> Self {
        Self {
            id: TestimonialId::new(row.id),
            name: row.name,
            avatar: row.avatar,
            rating: row.rating,
            text: row.text,
            dessert_item_id: row.dessert_item_id.map(DessertItemId::new),
            approved: row.approved,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct RecommendationRow {
    id: i32,
    chef_name: String,
    chef_title: String,
    chef_image: String,
    text: String,
    dessert_item_id: Option<i32>,
    is_featured: bool,
    active: bool,
    created_at: DateTime<Utc>,
}

impl From<RecommendationRow> for ChefRecommendation {
    fn from(row: RecommendationRow) -> Self {
        Self {
            id: RecommendationId::new(row.id),
            chef_name: row.chef_name,
            chef_title: row.chef_title,
            chef_image: row.chef_image,
            text: row.text,
            dessert_item_id: row.dessert_item_id.map(DessertItemId::new),
            is_featured: row.is_featured,
            active: row.active,
            created_at: row.created_at,
        }
    }
}

const DESSERT_COLUMNS: &str = r"
    d.id, d.name, d.slug, d.description, d.price, d.category_id,
    c.name AS category_name, d.image, d.rating, d.reviews_count,
    d.dietary_info, d.ingredients, d.allergens, d.preparation_minutes,
    d.featured, d.seasonal, d.best_seller, d.available,
    d.created_at, d.updated_at
";

/// Filters for dessert listings.
#[derive(Debug, Default, Clone)]
pub struct DessertFilter {
    /// Category slug to filter by.
    pub category_slug: Option<String>,
    /// Only featured desserts.
    pub featured: Option<bool>,
    /// Only available desserts.
    pub available: Option<bool>,
    /// Case-insensitive substring over name and description.
    pub search: Option<String>,
    /// Page number, 1-based.
    pub page: u32,
    /// Page size, capped by the repository.
    pub page_size: u32,
}

/// Fields for creating or updating a dessert through the admin API.
#[derive(Debug, Clone)]
pub struct DessertInput {
    pub name: String,
    pub slug: String,
    pub description: String,
    pub price: Money,
    pub category_id: CategoryId,
    pub image: String,
    pub dietary_info: Vec<String>,
    pub ingredients: Vec<String>,
    pub allergens: Vec<String>,
    pub preparation_minutes: i32,
    pub featured: bool,
    pub seasonal: bool,
    pub best_seller: bool,
    pub available: bool,
}

/// Fields for creating or updating a category.
#[derive(Debug, Clone)]
pub struct CategoryInput {
    pub name: String,
    pub slug: String,
    pub description: String,
    pub image: String,
    pub display_order: i32,
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for catalog database operations.
pub struct CatalogRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CatalogRepository<'a> {
    /// Create a new catalog repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    // Categories
    // =========================================================================

    /// List all categories ordered by display order then name.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_categories(&self) -> Result<Vec<Category>, RepositoryError> {
        let rows = sqlx::query_as::<_, CategoryRow>(
            r"
            SELECT c.id, c.name, c.slug, c.description, c.image, c.display_order,
                   c.created_at,
                   (SELECT COUNT(*) FROM dessert_item d
                    WHERE d.category_id = c.id AND d.available) AS product_count
            FROM category c
            ORDER BY c.display_order, c.name
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Create a category.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the name or slug already exists.
    pub async fn create_category(
        &self,
        input: &CategoryInput,
    ) -> Result<Category, RepositoryError> {
        let row = sqlx::query_as::<_, CategoryRow>(
            r"
            INSERT INTO category (name, slug, description, image, display_order)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, slug, description, image, display_order, created_at,
                      0::BIGINT AS product_count
            ",
        )
        .bind(&input.name)
        .bind(&input.slug)
        .bind(&input.description)
        .bind(&input.image)
        .bind(input.display_order)
        .fetch_one(self.pool)
        .await
        .map_err(|e| RepositoryError::from_sqlx(e, "category name or slug already exists"))?;

        Ok(row.into())
    }

    /// Update a category.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the category doesn't exist.
    pub async fn update_category(
        &self,
        id: CategoryId,
        input: &CategoryInput,
    ) -> Result<Category, RepositoryError> {
        let row = sqlx::query_as::<_, CategoryRow>(
            r"
            UPDATE category
            SET name = $2, slug = $3, description = $4, image = $5, display_order = $6
            WHERE id = $1
            RETURNING id, name, slug, description, image, display_order, created_at,
                      (SELECT COUNT(*) FROM dessert_item d
                       WHERE d.category_id = category.id AND d.available) AS product_count
            ",
        )
        .bind(id.as_i32())
        .bind(&input.name)
        .bind(&input.slug)
        .bind(&input.description)
        .bind(&input.image)
        .bind(input.display_order)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| RepositoryError::from_sqlx(e, "category name or slug already exists"))?;

        row.map(Into::into).ok_or(RepositoryError::NotFound)
    }

    /// Delete a category and (via cascade) its desserts.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the category doesn't exist.
    pub async fn delete_category(&self, id: CategoryId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM category WHERE id = $1")
            .bind(id.as_i32())
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    // =========================================================================
    // Desserts
    // =========================================================================

    /// List desserts matching the filter, featured and best sellers first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_desserts(
        &self,
        filter: &DessertFilter,
    ) -> Result<Vec<DessertItem>, RepositoryError> {
        let page_size = i64::from(filter.page_size.clamp(1, 100));
        let offset = i64::from(filter.page.max(1) - 1) * page_size;
        let search = filter.search.as_ref().map(|s| format!("%{s}%"));

        let query = format!(
            r"
            SELECT {DESSERT_COLUMNS}
            FROM dessert_item d
            JOIN category c ON c.id = d.category_id
            WHERE ($1::TEXT IS NULL OR c.slug = $1)
              AND ($2::BOOLEAN IS NULL OR d.featured = $2)
              AND ($3::BOOLEAN IS NULL OR d.available = $3)
              AND ($4::TEXT IS NULL OR d.name ILIKE $4 OR d.description ILIKE $4)
            ORDER BY d.featured DESC, d.best_seller DESC, d.name
            LIMIT $5 OFFSET $6
            "
        );

        let rows = sqlx::query_as::<_, DessertRow>(&query)
            .bind(&filter.category_slug)
            .bind(filter.featured)
            .bind(filter.available)
            .bind(&search)
            .bind(page_size)
            .bind(offset)
            .fetch_all(self.pool)
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Get a dessert by slug.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_dessert_by_slug(
        &self,
        slug: &str,
    ) -> Result<Option<DessertItem>, RepositoryError> {
        let query = format!(
            r"
            SELECT {DESSERT_COLUMNS}
            FROM dessert_item d
            JOIN category c ON c.id = d.category_id
            WHERE d.slug = $1
            "
        );

        let row = sqlx::query_as::<_, DessertRow>(&query)
            .bind(slug)
            .fetch_optional(self.pool)
            .await?;

        Ok(row.map(Into::into))
    }

    /// Get a dessert by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_dessert(
        &self,
        id: DessertItemId,
    ) -> Result<Option<DessertItem>, RepositoryError> {
        let query = format!(
            r"
            SELECT {DESSERT_COLUMNS}
            FROM dessert_item d
            JOIN category c ON c.id = d.category_id
            WHERE d.id = $1
            "
        );

        let row = sqlx::query_as::<_, DessertRow>(&query)
            .bind(id.as_i32())
            .fetch_optional(self.pool)
            .await?;

        Ok(row.map(Into::into))
    }

    /// Find an available dessert by name: exact match, then substring, then
    /// by any word of the query longer than two characters.
    ///
    /// This is the chat assistant's product lookup, so it is deliberately
    /// forgiving about what it accepts.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn find_dessert_by_name(
        &self,
        name: &str,
    ) -> Result<Option<DessertItem>, RepositoryError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }

        let exact = self
            .first_available_matching("LOWER(d.name) = LOWER($1)", trimmed)
            .await?;
        if exact.is_some() {
            return Ok(exact);
        }

        let contains = self
            .first_available_matching("d.name ILIKE $1", &format!("%{trimmed}%"))
            .await?;
        if contains.is_some() {
            return Ok(contains);
        }

        for word in trimmed.split_whitespace().filter(|w| w.len() > 2) {
            let hit = self
                .first_available_matching("d.name ILIKE $1", &format!("%{word}%"))
                .await?;
            if hit.is_some() {
                return Ok(hit);
            }
        }

        Ok(None)
    }

    async fn first_available_matching(
        &self,
        predicate: &str,
        value: &str,
    ) -> Result<Option<DessertItem>, RepositoryError> {
        let query = format!(
            r"
            SELECT {DESSERT_COLUMNS}
            FROM dessert_item d
            JOIN category c ON c.id = d.category_id
            WHERE d.available AND {predicate}
            ORDER BY d.name
            LIMIT 1
            "
        );

        let row = sqlx::query_as::<_, DessertRow>(&query)
            .bind(value)
            .fetch_optional(self.pool)
            .await?;

        Ok(row.map(Into::into))
    }

    /// List available desserts, optionally filtered by a category name or
    /// product-name fragment (the chat "list products" path).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_available(
        &self,
        category_filter: Option<&str>,
        limit: u32,
    ) -> Result<Vec<DessertItem>, RepositoryError> {
        let pattern = category_filter.map(|f| format!("%{f}%"));

        let query = format!(
            r"
            SELECT {DESSERT_COLUMNS}
            FROM dessert_item d
            JOIN category c ON c.id = d.category_id
            WHERE d.available
              AND ($1::TEXT IS NULL OR c.name ILIKE $1 OR d.name ILIKE $1)
            ORDER BY d.featured DESC, d.best_seller DESC, d.name
            LIMIT $2
            "
        );

        let rows = sqlx::query_as::<_, DessertRow>(&query)
            .bind(&pattern)
            .bind(i64::from(limit))
            .fetch_all(self.pool)
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Names of all available desserts, for intent-classification context.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn available_product_names(&self, limit: u32) -> Result<Vec<String>, RepositoryError> {
        let names = sqlx::query_scalar::<_, String>(
            "SELECT name FROM dessert_item WHERE available ORDER BY name LIMIT $1",
        )
        .bind(i64::from(limit))
        .fetch_all(self.pool)
        .await?;

        Ok(names)
    }

    /// Create a dessert.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the slug already exists.
    pub async fn create_dessert(
        &self,
        input: &DessertInput,
    ) -> Result<DessertItem, RepositoryError> {
        let id = sqlx::query_scalar::<_, i32>(
            r"
            INSERT INTO dessert_item
                (name, slug, description, price, category_id, image,
                 dietary_info, ingredients, allergens, preparation_minutes,
                 featured, seasonal, best_seller, available)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            RETURNING id
            ",
        )
        .bind(&input.name)
        .bind(&input.slug)
        .bind(&input.description)
        .bind(input.price)
        .bind(input.category_id.as_i32())
        .bind(&input.image)
        .bind(Json(&input.dietary_info))
        .bind(Json(&input.ingredients))
        .bind(Json(&input.allergens))
        .bind(input.preparation_minutes)
        .bind(input.featured)
        .bind(input.seasonal)
        .bind(input.best_seller)
        .bind(input.available)
        .fetch_one(self.pool)
        .await
        .map_err(|e| RepositoryError::from_sqlx(e, "dessert slug already exists"))?;

        self.get_dessert(DessertItemId::new(id))
            .await?
            .ok_or(RepositoryError::NotFound)
    }

    /// Update a dessert.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the dessert doesn't exist.
    pub async fn update_dessert(
        &self,
        id: DessertItemId,
        input: &DessertInput,
    ) -> Result<DessertItem, RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE dessert_item
            SET name = $2, slug = $3, description = $4, price = $5, category_id = $6,
                image = $7, dietary_info = $8, ingredients = $9, allergens = $10,
                preparation_minutes = $11, featured = $12, seasonal = $13,
                best_seller = $14, available = $15, updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(id.as_i32())
        .bind(&input.name)
        .bind(&input.slug)
        .bind(&input.description)
        .bind(input.price)
        .bind(input.category_id.as_i32())
        .bind(&input.image)
        .bind(Json(&input.dietary_info))
        .bind(Json(&input.ingredients))
        .bind(Json(&input.allergens))
        .bind(input.preparation_minutes)
        .bind(input.featured)
        .bind(input.seasonal)
        .bind(input.best_seller)
        .bind(input.available)
        .execute(self.pool)
        .await
        .map_err(|e| RepositoryError::from_sqlx(e, "dessert slug already exists"))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        self.get_dessert(id).await?.ok_or(RepositoryError::NotFound)
    }

    /// Delete a dessert.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the dessert doesn't exist.
    pub async fn delete_dessert(&self, id: DessertItemId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM dessert_item WHERE id = $1")
            .bind(id.as_i32())
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    // =========================================================================
    // Testimonials & Chef Recommendations
    // =========================================================================

    /// List testimonials, optionally only approved ones.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_testimonials(
        &self,
        approved_only: bool,
    ) -> Result<Vec<Testimonial>, RepositoryError> {
        let rows = sqlx::query_as::<_, TestimonialRow>(
            r"
            SELECT id, name, avatar, rating, text, dessert_item_id, approved, created_at
            FROM customer_testimonial
            WHERE NOT $1 OR approved
            ORDER BY created_at DESC
            ",
        )
        .bind(approved_only)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Create a testimonial.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn create_testimonial(
        &self,
        name: &str,
        avatar: &str,
        rating: i32,
        text: &str,
        dessert_item_id: Option<DessertItemId>,
        approved: bool,
    ) -> Result<Testimonial, RepositoryError> {
        let row = sqlx::query_as::<_, TestimonialRow>(
            r"
            INSERT INTO customer_testimonial (name, avatar, rating, text, dessert_item_id, approved)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, name, avatar, rating, text, dessert_item_id, approved, created_at
            ",
        )
        .bind(name)
        .bind(avatar)
        .bind(rating)
        .bind(text)
        .bind(dessert_item_id.map(|id| id.as_i32()))
        .bind(approved)
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }

    /// Update a testimonial's approval state and text fields.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the testimonial doesn't exist.
    pub async fn update_testimonial(
        &self,
        id: TestimonialId,
        rating: i32,
        text: &str,
        approved: bool,
    ) -> Result<Testimonial, RepositoryError> {
        let row = sqlx::query_as::<_, TestimonialRow>(
            r"
            UPDATE customer_testimonial
            SET rating = $2, text = $3, approved = $4
            WHERE id = $1
            RETURNING id, name, avatar, rating, text, dessert_item_id, approved, created_at
            ",
        )
        .bind(id.as_i32())
        .bind(rating)
        .bind(text)
        .bind(approved)
        .fetch_optional(self.pool)
        .await?;

        row.map(Into::into).ok_or(RepositoryError::NotFound)
    }

    /// Delete a testimonial.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the testimonial doesn't exist.
    pub async fn delete_testimonial(&self, id: TestimonialId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM customer_testimonial WHERE id = $1")
            .bind(id.as_i32())
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    /// List chef recommendations, optionally only active ones.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_recommendations(
        &self,
        active_only: bool,
    ) -> Result<Vec<ChefRecommendation>, RepositoryError> {
        let rows = sqlx::query_as::<_, RecommendationRow>(
            r"
            SELECT id, chef_name, chef_title, chef_image, text, dessert_item_id,
                   is_featured, active, created_at
            FROM chef_recommendation
            WHERE NOT $1 OR active
            ORDER BY created_at DESC
            ",
        )
        .bind(active_only)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Create a chef recommendation.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn create_recommendation(
        &self,
        chef_name: &str,
        chef_title: &str,
        chef_image: &str,
        text: &str,
        dessert_item_id: Option<DessertItemId>,
        is_featured: bool,
    ) -> Result<ChefRecommendation, RepositoryError> {
        let row = sqlx::query_as::<_, RecommendationRow>(
            r"
            INSERT INTO chef_recommendation
                (chef_name, chef_title, chef_image, text, dessert_item_id, is_featured)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, chef_name, chef_title, chef_image, text, dessert_item_id,
                      is_featured, active, created_at
            ",
        )
        .bind(chef_name)
        .bind(chef_title)
        .bind(chef_image)
        .bind(text)
        .bind(dessert_item_id.map(|id| id.as_i32()))
        .bind(is_featured)
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }

    /// Update a chef recommendation.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the recommendation doesn't exist.
    pub async fn update_recommendation(
        &self,
        id: RecommendationId,
        text: &str,
        is_featured: bool,
        active: bool,
    ) -> Result<ChefRecommendation, RepositoryError> {
        let row = sqlx::query_as::<_, RecommendationRow>(
            r"
            UPDATE chef_recommendation
            SET text = $2, is_featured = $3, active = $4
            WHERE id = $1
            RETURNING id, chef_name, chef_title, chef_image, text, dessert_item_id,
                      is_featured, active, created_at
            ",
        )
        .bind(id.as_i32())
        .bind(text)
        .bind(is_featured)
        .bind(active)
        .fetch_optional(self.pool)
        .await?;

        row.map(Into::into).ok_or(RepositoryError::NotFound)
    }

    /// Delete a chef recommendation.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the recommendation doesn't exist.
    pub async fn delete_recommendation(&self, id: RecommendationId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM chef_recommendation WHERE id = $1")
            .bind(id.as_i32())
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
