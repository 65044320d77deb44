//! CMS content repository: About Us, Our Story, and FAQ pages.
//!
//! Each page type is effectively a singleton: readers get the most recent
//! active row with its children attached. Admin writes update the page row
//! and replace its child collections wholesale inside one transaction, which
//! keeps the editing API simple (the admin UI always submits the full page).

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use sweet_dessert_core::{AboutPageId, FaqCategoryId, FaqItemId, FaqPageId, StoryPageId};

use super::RepositoryError;
use crate::models::content::{
    AboutUsPage, AboutValue, FaqCategory, FaqItem, FaqPage, ImpactMetric, OurStoryPage, TeamMember,
    TimelineEvent,
};

// =============================================================================
// Row types
// =============================================================================

#[derive(Debug, sqlx::FromRow)]
struct AboutPageRow {
    id: i32,
    hero_title: String,
    hero_subtitle: String,
    hero_badge: String,
    mission_title: String,
    mission_text: String,
    values_title: String,
    values_subtitle: String,
    store_title: String,
    store_description: String,
    store_address: String,
    store_hours: String,
    cta_title: String,
    cta_subtitle: String,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, sqlx::FromRow)]
struct AboutValueRow {
    id: i32,
    page_id: i32,
    title: String,
    description: String,
    icon: String,
    color_gradient: String,
    display_order: i32,
}

#[derive(Debug, sqlx::FromRow)]
struct TeamMemberRow {
    id: i32,
    page_id: i32,
    name: String,
    role: String,
    description: String,
    image_emoji: String,
    display_order: i32,
}

#[derive(Debug, sqlx::FromRow)]
struct StoryPageRow {
    id: i32,
    hero_title: String,
    hero_subtitle: String,
    hero_badge: String,
    founder_name: String,
    founder_title: String,
    founder_image: String,
    founder_quote: String,
    founder_description: String,
    journey_title: String,
    journey_subtitle: String,
    impact_title: String,
    impact_subtitle: String,
    vision_title: String,
    vision_text: String,
    cta_title: String,
    cta_subtitle: String,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, sqlx::FromRow)]
struct TimelineRow {
    id: i32,
    page_id: i32,
    year: String,
    title: String,
    description: String,
    icon: String,
    color_gradient: String,
    display_order: i32,
}

#[derive(Debug, sqlx::FromRow)]
struct ImpactRow {
    id: i32,
    page_id: i32,
    number: String,
    label: String,
    icon: String,
    display_order: i32,
}

#[derive(Debug, sqlx::FromRow)]
struct FaqPageRow {
    id: i32,
    title: String,
    subtitle: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, sqlx::FromRow)]
struct FaqCategoryRow {
    id: i32,
    page_id: i32,
    name: String,
    description: String,
    icon: String,
    color: String,
    display_order: i32,
    is_active: bool,
}

#[derive(Debug, sqlx::FromRow)]
struct FaqItemRow {
    id: i32,
    category_id: i32,
    question: String,
    answer: String,
    display_order: i32,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

// =============================================================================
// Input types (admin writes)
// =============================================================================

/// Full About Us page content as submitted by the admin editor.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct AboutPageInput {
    pub hero_title: String,
    pub hero_subtitle: String,
    pub hero_badge: String,
    pub mission_title: String,
    pub mission_text: String,
    pub values_title: String,
    pub values_subtitle: String,
    pub store_title: String,
    pub store_description: String,
    pub store_address: String,
    pub store_hours: String,
    pub cta_title: String,
    pub cta_subtitle: String,
    pub values: Vec<AboutValueInput>,
    pub team_members: Vec<TeamMemberInput>,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct AboutValueInput {
    pub title: String,
    pub description: String,
    pub icon: String,
    pub color_gradient: String,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct TeamMemberInput {
    pub name: String,
    pub role: String,
    pub description: String,
    pub image_emoji: String,
}

/// Full Our Story page content as submitted by the admin editor.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct StoryPageInput {
    pub hero_title: String,
    pub hero_subtitle: String,
    pub hero_badge: String,
    pub founder_name: String,
    pub founder_title: String,
    pub founder_image: String,
    pub founder_quote: String,
    pub founder_description: String,
    pub journey_title: String,
    pub journey_subtitle: String,
    pub impact_title: String,
    pub impact_subtitle: String,
    pub vision_title: String,
    pub vision_text: String,
    pub cta_title: String,
    pub cta_subtitle: String,
    pub timeline: Vec<TimelineEventInput>,
    pub impact_metrics: Vec<ImpactMetricInput>,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct TimelineEventInput {
    pub year: String,
    pub title: String,
    pub description: String,
    pub icon: String,
    pub color_gradient: String,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct ImpactMetricInput {
    pub number: String,
    pub label: String,
    pub icon: String,
}

/// Full FAQ page content as submitted by the admin editor.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct FaqPageInput {
    pub title: String,
    pub subtitle: String,
    pub categories: Vec<FaqCategoryInput>,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct FaqCategoryInput {
    pub name: String,
    pub description: String,
    pub icon: String,
    pub color: String,
    pub is_active: bool,
    pub items: Vec<FaqItemInput>,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct FaqItemInput {
    pub question: String,
    pub answer: String,
    pub is_active: bool,
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for CMS page content.
pub struct ContentRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ContentRepository<'a> {
    /// Create a new content repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    // About Us
    // =========================================================================

    /// Get the active About Us page with its values and team members.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn about_page(&self) -> Result<Option<AboutUsPage>, RepositoryError> {
        let page = sqlx::query_as::<_, AboutPageRow>(
            r"
            SELECT id, hero_title, hero_subtitle, hero_badge, mission_title, mission_text,
                   values_title, values_subtitle, store_title, store_description,
                   store_address, store_hours, cta_title, cta_subtitle, is_active,
                   created_at, updated_at
            FROM about_us_page
            WHERE is_active
            ORDER BY created_at DESC
            LIMIT 1
            ",
        )
        .fetch_optional(self.pool)
        .await?;

        let Some(page) = page else { return Ok(None) };
        let page_id = AboutPageId::new(page.id);

        let values = sqlx::query_as::<_, AboutValueRow>(
            r"
            SELECT id, page_id, title, description, icon, color_gradient, display_order
            FROM about_us_value
            WHERE page_id = $1
            ORDER BY display_order, title
            ",
        )
        .bind(page.id)
        .fetch_all(self.pool)
        .await?;

        let team = sqlx::query_as::<_, TeamMemberRow>(
            r"
            SELECT id, page_id, name, role, description, image_emoji, display_order
            FROM about_us_team_member
            WHERE page_id = $1
            ORDER BY display_order, name
            ",
        )
        .bind(page.id)
        .fetch_all(self.pool)
        .await?;

        Ok(Some(AboutUsPage {
            id: page_id,
            hero_title: page.hero_title,
            hero_subtitle: page.hero_subtitle,
            hero_badge: page.hero_badge,
            mission_title: page.mission_title,
            mission_text: page.mission_text,
            values_title: page.values_title,
            values_subtitle: page.values_subtitle,
            store_title: page.store_title,
            store_description: page.store_description,
            store_address: page.store_address,
            store_hours: page.store_hours,
            cta_title: page.cta_title,
            cta_subtitle: page.cta_subtitle,
            is_active: page.is_active,
            created_at: page.created_at,
            updated_at: page.updated_at,
            values: values
                .into_iter()
                .map(|v| AboutValue {
                    id: v.id,
                    page_id: AboutPageId::new(v.page_id),
                    title: v.title,
                    description: v.description,
                    icon: v.icon,
                    color_gradient: v.color_gradient,
                    display_order: v.display_order,
                })
                .collect(),
            team_members: team
                .into_iter()
                .map(|m| TeamMember {
                    id: m.id,
                    page_id: AboutPageId::new(m.page_id),
                    name: m.name,
                    role: m.role,
                    description: m.description,
                    image_emoji: m.image_emoji,
                    display_order: m.display_order,
                })
                .collect(),
        }))
    }

    /// Replace the About Us page content (creating the page row if missing).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a statement fails.
    pub async fn save_about_page(
        &self,
        input: &AboutPageInput,
    ) -> Result<AboutUsPage, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let existing: Option<i32> = sqlx::query_scalar(
            "SELECT id FROM about_us_page WHERE is_active ORDER BY created_at DESC LIMIT 1",
        )
        .fetch_optional(&mut *tx)
        .await?;

        let page_id: i32 = if let Some(id) = existing {
            sqlx::query(
                r"
                UPDATE about_us_page
                SET hero_title = $2, hero_subtitle = $3, hero_badge = $4,
                    mission_title = $5, mission_text = $6, values_title = $7,
                    values_subtitle = $8, store_title = $9, store_description = $10,
                    store_address = $11, store_hours = $12, cta_title = $13,
                    cta_subtitle = $14, updated_at = NOW()
                WHERE id = $1
                ",
            )
            .bind(id)
            .bind(&input.hero_title)
            .bind(&input.hero_subtitle)
            .bind(&input.hero_badge)
            .bind(&input.mission_title)
            .bind(&input.mission_text)
            .bind(&input.values_title)
            .bind(&input.values_subtitle)
            .bind(&input.store_title)
            .bind(&input.store_description)
            .bind(&input.store_address)
            .bind(&input.store_hours)
            .bind(&input.cta_title)
            .bind(&input.cta_subtitle)
            .execute(&mut *tx)
            .await?;
            id
        } else {
            sqlx::query_scalar(
                r"
                INSERT INTO about_us_page
                    (hero_title, hero_subtitle, hero_badge, mission_title, mission_text,
                     values_title, values_subtitle, store_title, store_description,
                     store_address, store_hours, cta_title, cta_subtitle)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
                RETURNING id
                ",
            )
            .bind(&input.hero_title)
            .bind(&input.hero_subtitle)
            .bind(&input.hero_badge)
            .bind(&input.mission_title)
            .bind(&input.mission_text)
            .bind(&input.values_title)
            .bind(&input.values_subtitle)
            .bind(&input.store_title)
            .bind(&input.store_description)
            .bind(&input.store_address)
            .bind(&input.store_hours)
            .bind(&input.cta_title)
            .bind(&input.cta_subtitle)
            .fetch_one(&mut *tx)
            .await?
        };

        sqlx::query("DELETE FROM about_us_value WHERE page_id = $1")
            .bind(page_id)
            .execute(&mut *tx)
            .await?;
        for (order, value) in input.values.iter().enumerate() {
            sqlx::query(
                r"
                INSERT INTO about_us_value
                    (page_id, title, description, icon, color_gradient, display_order)
                VALUES ($1, $2, $3, $4, $5, $6)
                ",
            )
            .bind(page_id)
            .bind(&value.title)
            .bind(&value.description)
            .bind(&value.icon)
            .bind(&value.color_gradient)
            .bind(i32::try_from(order).unwrap_or(i32::MAX))
            .execute(&mut *tx)
            .await?;
        }

        sqlx::query("DELETE FROM about_us_team_member WHERE page_id = $1")
            .bind(page_id)
            .execute(&mut *tx)
            .await?;
        for (order, member) in input.team_members.iter().enumerate() {
            sqlx::query(
                r"
                INSERT INTO about_us_team_member
                    (page_id, name, role, description, image_emoji, display_order)
                VALUES ($1, $2, $3, $4, $5, $6)
                ",
            )
            .bind(page_id)
            .bind(&member.name)
            .bind(&member.role)
            .bind(&member.description)
            .bind(&member.image_emoji)
            .bind(i32::try_from(order).unwrap_or(i32::MAX))
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        self.about_page().await?.ok_or(RepositoryError::NotFound)
    }

    // =========================================================================
    // Our Story
    // =========================================================================

    /// Get the active Our Story page with timeline and impact metrics.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn story_page(&self) -> Result<Option<OurStoryPage>, RepositoryError> {
        let page = sqlx::query_as::<_, StoryPageRow>(
            r"
            SELECT id, hero_title, hero_subtitle, hero_badge, founder_name, founder_title,
                   founder_image, founder_quote, founder_description, journey_title,
                   journey_subtitle, impact_title, impact_subtitle, vision_title,
                   vision_text, cta_title, cta_subtitle, is_active, created_at, updated_at
            FROM our_story_page
            WHERE is_active
            ORDER BY created_at DESC
            LIMIT 1
            ",
        )
        .fetch_optional(self.pool)
        .await?;

        let Some(page) = page else { return Ok(None) };

        let timeline = sqlx::query_as::<_, TimelineRow>(
            r"
            SELECT id, page_id, year, title, description, icon, color_gradient, display_order
            FROM story_timeline_event
            WHERE page_id = $1
            ORDER BY display_order, year
            ",
        )
        .bind(page.id)
        .fetch_all(self.pool)
        .await?;

        let impact = sqlx::query_as::<_, ImpactRow>(
            r"
            SELECT id, page_id, number, label, icon, display_order
            FROM story_impact_metric
            WHERE page_id = $1
            ORDER BY display_order, label
            ",
        )
        .bind(page.id)
        .fetch_all(self.pool)
        .await?;

        Ok(Some(OurStoryPage {
            id: StoryPageId::new(page.id),
            hero_title: page.hero_title,
            hero_subtitle: page.hero_subtitle,
            hero_badge: page.hero_badge,
            founder_name: page.founder_name,
            founder_title: page.founder_title,
            founder_image: page.founder_image,
            founder_quote: page.founder_quote,
            founder_description: page.founder_description,
            journey_title: page.journey_title,
            journey_subtitle: page.journey_subtitle,
            impact_title: page.impact_title,
            impact_subtitle: page.impact_subtitle,
            vision_title: page.vision_title,
            vision_text: page.vision_text,
            cta_title: page.cta_title,
            cta_subtitle: page.cta_subtitle,
            is_active: page.is_active,
            created_at: page.created_at,
            updated_at: page.updated_at,
            timeline: timeline
                .into_iter()
                .map(|t| TimelineEvent {
                    id: t.id,
                    page_id: StoryPageId::new(t.page_id),
                    year: t.year,
                    title: t.title,
                    description: t.description,
                    icon: t.icon,
                    color_gradient: t.color_gradient,
                    display_order: t.display_order,
                })
                .collect(),
            impact_metrics: impact
                .into_iter()
                .map(|m| ImpactMetric {
                    id: m.id,
                    page_id: StoryPageId::new(m.page_id),
                    number: m.number,
                    label: m.label,
                    icon: m.icon,
                    display_order: m.display_order,
                })
                .collect(),
        }))
    }

    /// Replace the Our Story page content (creating the page row if missing).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a statement fails.
    pub async fn save_story_page(
        &self,
        input: &StoryPageInput,
    ) -> Result<OurStoryPage, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let existing: Option<i32> = sqlx::query_scalar(
            "SELECT id FROM our_story_page WHERE is_active ORDER BY created_at DESC LIMIT 1",
        )
        .fetch_optional(&mut *tx)
        .await?;

        let page_id: i32 = if let Some(id) = existing {
            sqlx::query(
                r"
                UPDATE our_story_page
                SET hero_title = $2, hero_subtitle = $3, hero_badge = $4, founder_name = $5,
                    founder_title = $6, founder_image = $7, founder_quote = $8,
                    founder_description = $9, journey_title = $10, journey_subtitle = $11,
                    impact_title = $12, impact_subtitle = $13, vision_title = $14,
                    vision_text = $15, cta_title = $16, cta_subtitle = $17, updated_at = NOW()
                WHERE id = $1
                ",
            )
            .bind(id)
            .bind(&input.hero_title)
            .bind(&input.hero_subtitle)
            .bind(&input.hero_badge)
            .bind(&input.founder_name)
            .bind(&input.founder_title)
            .bind(&input.founder_image)
            .bind(&input.founder_quote)
            .bind(&input.founder_description)
            .bind(&input.journey_title)
            .bind(&input.journey_subtitle)
            .bind(&input.impact_title)
            .bind(&input.impact_subtitle)
            .bind(&input.vision_title)
            .bind(&input.vision_text)
            .bind(&input.cta_title)
            .bind(&input.cta_subtitle)
            .execute(&mut *tx)
            .await?;
            id
        } else {
            sqlx::query_scalar(
                r"
                INSERT INTO our_story_page
                    (hero_title, hero_subtitle, hero_badge, founder_name, founder_title,
                     founder_image, founder_quote, founder_description, journey_title,
                     journey_subtitle, impact_title, impact_subtitle, vision_title,
                     vision_text, cta_title, cta_subtitle)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
                RETURNING id
                ",
            )
            .bind(&input.hero_title)
            .bind(&input.hero_subtitle)
            .bind(&input.hero_badge)
            .bind(&input.founder_name)
            .bind(&input.founder_title)
            .bind(&input.founder_image)
            .bind(&input.founder_quote)
            .bind(&input.founder_description)
            .bind(&input.journey_title)
            .bind(&input.journey_subtitle)
            .bind(&input.impact_title)
            .bind(&input.impact_subtitle)
            .bind(&input.vision_title)
            .bind(&input.vision_text)
            .bind(&input.cta_title)
            .bind(&input.cta_subtitle)
            .fetch_one(&mut *tx)
            .await?
        };

        sqlx::query("DELETE FROM story_timeline_event WHERE page_id = $1")
            .bind(page_id)
            .execute(&mut *tx)
            .await?;
        for (order, event) in input.timeline.iter().enumerate() {
            sqlx::query(
                r"
                INSERT INTO story_timeline_event
                    (page_id, year, title, description, icon, color_gradient, display_order)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                ",
            )
            .bind(page_id)
            .bind(&event.year)
            .bind(&event.title)
            .bind(&event.description)
            .bind(&event.icon)
            .bind(&event.color_gradient)
            .bind(i32::try_from(order).unwrap_or(i32::MAX))
            .execute(&mut *tx)
            .await?;
        }

        sqlx::query("DELETE FROM story_impact_metric WHERE page_id = $1")
            .bind(page_id)
            .execute(&mut *tx)
            .await?;
        for (order, metric) in input.impact_metrics.iter().enumerate() {
            sqlx::query(
                r"
                INSERT INTO story_impact_metric (page_id, number, label, icon, display_order)
                VALUES ($1, $2, $3, $4, $5)
                ",
            )
            .bind(page_id)
            .bind(&metric.number)
            .bind(&metric.label)
            .bind(&metric.icon)
            .bind(i32::try_from(order).unwrap_or(i32::MAX))
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        self.story_page().await?.ok_or(RepositoryError::NotFound)
    }

    // =========================================================================
    // FAQ
    // =========================================================================

    /// Get the FAQ page with active categories and items.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn faq_page(&self) -> Result<Option<FaqPage>, RepositoryError> {
        let page = sqlx::query_as::<_, FaqPageRow>(
            r"
            SELECT id, title, subtitle, created_at, updated_at
            FROM faq_page
            ORDER BY created_at DESC
            LIMIT 1
            ",
        )
        .fetch_optional(self.pool)
        .await?;

        let Some(page) = page else { return Ok(None) };

        let categories = sqlx::query_as::<_, FaqCategoryRow>(
            r"
            SELECT id, page_id, name, description, icon, color, display_order, is_active
            FROM faq_category
            WHERE page_id = $1 AND is_active
            ORDER BY display_order, name
            ",
        )
        .bind(page.id)
        .fetch_all(self.pool)
        .await?;

        let mut result_categories = Vec::with_capacity(categories.len());
        for category in categories {
            let items = sqlx::query_as::<_, FaqItemRow>(
                r"
                SELECT id, category_id, question, answer, display_order, is_active,
                       created_at, updated_at
                FROM faq_item
                WHERE category_id = $1 AND is_active
                ORDER BY display_order, question
                ",
            )
            .bind(category.id)
            .fetch_all(self.pool)
            .await?;

            result_categories.push(FaqCategory {
                id: FaqCategoryId::new(category.id),
                page_id: FaqPageId::new(category.page_id),
                name: category.name,
                description: category.description,
                icon: category.icon,
                color: category.color,
                display_order: category.display_order,
                is_active: category.is_active,
                items: items.into_iter().map(Into::into).collect(),
            });
        }

        Ok(Some(FaqPage {
            id: FaqPageId::new(page.id),
            title: page.title,
            subtitle: page.subtitle,
            created_at: page.created_at,
            updated_at: page.updated_at,
            categories: result_categories,
        }))
    }

    /// All active FAQ items with their category names, for chat scoring.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn active_faq_items(&self) -> Result<Vec<(FaqItem, String)>, RepositoryError> {
        #[derive(sqlx::FromRow)]
        struct ItemWithCategory {
            #[sqlx(flatten)]
            item: FaqItemRow,
            category_name: String,
        }

        let rows = sqlx::query_as::<_, ItemWithCategory>(
            r"
            SELECT i.id, i.category_id, i.question, i.answer, i.display_order,
                   i.is_active, i.created_at, i.updated_at, c.name AS category_name
            FROM faq_item i
            JOIN faq_category c ON c.id = i.category_id
            WHERE i.is_active AND c.is_active
            ORDER BY c.display_order, i.display_order
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| (r.item.into(), r.category_name))
            .collect())
    }

    /// Replace the FAQ page content (creating the page row if missing).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a statement fails.
    pub async fn save_faq_page(&self, input: &FaqPageInput) -> Result<FaqPage, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let existing: Option<i32> =
            sqlx::query_scalar("SELECT id FROM faq_page ORDER BY created_at DESC LIMIT 1")
                .fetch_optional(&mut *tx)
                .await?;

        let page_id: i32 = if let Some(id) = existing {
            sqlx::query("UPDATE faq_page SET title = $2, subtitle = $3, updated_at = NOW() WHERE id = $1")
                .bind(id)
                .bind(&input.title)
                .bind(&input.subtitle)
                .execute(&mut *tx)
                .await?;
            id
        } else {
            sqlx::query_scalar("INSERT INTO faq_page (title, subtitle) VALUES ($1, $2) RETURNING id")
                .bind(&input.title)
                .bind(&input.subtitle)
                .fetch_one(&mut *tx)
                .await?
        };

        // Items cascade with their categories.
        sqlx::query("DELETE FROM faq_category WHERE page_id = $1")
            .bind(page_id)
            .execute(&mut *tx)
            .await?;

        for (category_order, category) in input.categories.iter().enumerate() {
            let category_id: i32 = sqlx::query_scalar(
                r"
                INSERT INTO faq_category
                    (page_id, name, description, icon, color, display_order, is_active)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                RETURNING id
                ",
            )
            .bind(page_id)
            .bind(&category.name)
            .bind(&category.description)
            .bind(&category.icon)
            .bind(&category.color)
            .bind(i32::try_from(category_order).unwrap_or(i32::MAX))
            .bind(category.is_active)
            .fetch_one(&mut *tx)
            .await?;

            for (item_order, item) in category.items.iter().enumerate() {
                sqlx::query(
                    r"
                    INSERT INTO faq_item
                        (category_id, question, answer, display_order, is_active)
                    VALUES ($1, $2, $3, $4, $5)
                    ",
                )
                .bind(category_id)
                .bind(&item.question)
                .bind(&item.answer)
                .bind(i32::try_from(item_order).unwrap_or(i32::MAX))
                .bind(item.is_active)
                .execute(&mut *tx)
                .await?;
            }
        }

        tx.commit().await?;

        self.faq_page().await?.ok_or(RepositoryError::NotFound)
    }
}

impl From<FaqItemRow> for FaqItem {
    fn from(row: FaqItemRow) -> Self {
        Self {
            id: FaqItemId::new(row.id),
            category_id: FaqCategoryId::new(row.category_id),
            question: row.question,
            answer: row.answer,
            display_order: row.display_order,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
