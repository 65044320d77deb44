//! Order repository: creation with per-day order numbering, listing, and
//! status transitions.

use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, Transaction};

use sweet_dessert_core::{
    Email, Money, OrderId, OrderItemId, OrderNumber, OrderStatus, OrderType, PaymentMethod,
    PaymentStatus,
};

use super::RepositoryError;
use crate::models::orders::{Order, OrderItem};

// =============================================================================
// Internal Row Types
// =============================================================================

#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: uuid::Uuid,
    order_number: String,
    customer_name: String,
    customer_email: String,
    customer_phone: String,
    order_type: String,
    delivery_address: Option<serde_json::Value>,
    pickup_time: String,
    special_instructions: String,
    subtotal: Money,
    delivery_fee: Money,
    tax: Money,
    total: Money,
    payment_method: String,
    stripe_payment_intent_id: Option<String>,
    payment_status: String,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<OrderRow> for Order {
    type Error = RepositoryError;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        let corrupt = |what: &str, value: &str| {
            RepositoryError::DataCorruption(format!("invalid {what} in order row: {value}"))
        };

        Ok(Self {
            id: OrderId::new(row.id),
            order_number: OrderNumber::parse(&row.order_number)
                .map_err(|_| corrupt("order number", &row.order_number))?,
            customer_name: row.customer_name,
            customer_email: Email::parse(&row.customer_email)
                .map_err(|_| corrupt("email", &row.customer_email))?,
            customer_phone: row.customer_phone,
            order_type: row
                .order_type
                .parse()
                .map_err(|_| corrupt("order type", &row.order_type))?,
            delivery_address: row.delivery_address,
            pickup_time: row.pickup_time,
            special_instructions: row.special_instructions,
            subtotal: row.subtotal,
            delivery_fee: row.delivery_fee,
            tax: row.tax,
            total: row.total,
            payment_method: row
                .payment_method
                .parse()
                .map_err(|_| corrupt("payment method", &row.payment_method))?,
            stripe_payment_intent_id: row.stripe_payment_intent_id,
            payment_status: row
                .payment_status
                .parse()
                .map_err(|_| corrupt("payment status", &row.payment_status))?,
            status: row
                .status
                .parse()
                .map_err(|_| corrupt("status", &row.status))?,
            created_at: row.created_at,
            updated_at: row.updated_at,
            items: Vec::new(),
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct OrderItemRow {
    id: i32,
    order_id: uuid::Uuid,
    product_name: String,
    product_image: String,
    unit_price: Money,
    quantity: i32,
    customizations: serde_json::Value,
    total_price: Money,
}

impl From<OrderItemRow> for OrderItem {
    fn from(row: OrderItemRow) -> Self {
        Self {
            id: OrderItemId::new(row.id),
            order_id: OrderId::new(row.order_id),
            product_name: row.product_name,
            product_image: row.product_image,
            unit_price: row.unit_price,
            quantity: row.quantity,
            customizations: row.customizations,
            total_price: row.total_price,
        }
    }
}

const ORDER_COLUMNS: &str = r"
    id, order_number, customer_name, customer_email, customer_phone,
    order_type, delivery_address, pickup_time, special_instructions,
    subtotal, delivery_fee, tax, total, payment_method,
    stripe_payment_intent_id, payment_status, status, created_at, updated_at
";

/// Everything needed to create an order. Totals are computed (and the
/// identity `total = subtotal + delivery_fee + tax` enforced) by the
/// checkout service before this is built.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub customer_name: String,
    pub customer_email: Email,
    pub customer_phone: String,
    pub order_type: OrderType,
    pub delivery_address: Option<serde_json::Value>,
    pub pickup_time: String,
    pub special_instructions: String,
    pub subtotal: Money,
    pub delivery_fee: Money,
    pub tax: Money,
    pub total: Money,
    pub payment_method: PaymentMethod,
    pub stripe_payment_intent_id: Option<String>,
    pub items: Vec<NewOrderItem>,
}

/// A line item for a new order.
#[derive(Debug, Clone)]
pub struct NewOrderItem {
    pub product_name: String,
    pub product_image: String,
    pub unit_price: Money,
    pub quantity: u32,
    pub customizations: serde_json::Value,
}

/// Filters for the admin order listing.
#[derive(Debug, Default, Clone)]
pub struct OrderFilter {
    pub status: Option<OrderStatus>,
    pub order_type: Option<OrderType>,
    pub payment_status: Option<PaymentStatus>,
    /// Matches order number or customer email, case-insensitively.
    pub search: Option<String>,
    pub limit: u32,
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for order database operations.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Create an order with its items, assigning the next order number for
    /// the day.
    ///
    /// The number is derived from the day's current maximum inside the same
    /// transaction as the insert; the unique constraint on `order_number`
    /// backstops concurrent writers.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any statement fails.
    pub async fn create(&self, new_order: NewOrder) -> Result<Order, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let order_number = Self::next_order_number(&mut tx, new_order.order_type).await?;
        let id = OrderId::generate();

        // Store-paid orders start pending; online orders with an attached
        // intent are recorded as succeeded.
        let payment_status = match new_order.payment_method {
            PaymentMethod::Store => PaymentStatus::Pending,
            PaymentMethod::Online => {
                if new_order.stripe_payment_intent_id.is_some() {
                    PaymentStatus::Succeeded
                } else {
                    PaymentStatus::Pending
                }
            }
        };

        sqlx::query(
            r"
            INSERT INTO customer_order
                (id, order_number, customer_name, customer_email, customer_phone,
                 order_type, delivery_address, pickup_time, special_instructions,
                 subtotal, delivery_fee, tax, total, payment_method,
                 stripe_payment_intent_id, payment_status, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
            ",
        )
        .bind(id.as_uuid())
        .bind(order_number.as_str())
        .bind(&new_order.customer_name)
        .bind(new_order.customer_email.as_str())
        .bind(&new_order.customer_phone)
        .bind(new_order.order_type.to_string())
        .bind(&new_order.delivery_address)
        .bind(&new_order.pickup_time)
        .bind(&new_order.special_instructions)
        .bind(new_order.subtotal)
        .bind(new_order.delivery_fee)
        .bind(new_order.tax)
        .bind(new_order.total)
        .bind(new_order.payment_method.to_string())
        .bind(&new_order.stripe_payment_intent_id)
        .bind(payment_status.to_string())
        .bind(OrderStatus::Pending.to_string())
        .execute(&mut *tx)
        .await?;

        for item in &new_order.items {
            let total_price = Money::line_total(item.unit_price, item.quantity);
            sqlx::query(
                r"
                INSERT INTO order_item
                    (order_id, product_name, product_image, unit_price, quantity,
                     customizations, total_price)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                ",
            )
            .bind(id.as_uuid())
            .bind(&item.product_name)
            .bind(&item.product_image)
            .bind(item.unit_price)
            .bind(i32::try_from(item.quantity).unwrap_or(i32::MAX))
            .bind(&item.customizations)
            .bind(total_price)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        self.get(id).await?.ok_or(RepositoryError::NotFound)
    }

    /// Compute the next order number for today within a transaction.
    async fn next_order_number(
        tx: &mut Transaction<'_, Postgres>,
        order_type: OrderType,
    ) -> Result<OrderNumber, RepositoryError> {
        let today = Utc::now().date_naive();
        let prefix = OrderNumber::day_prefix(order_type, today);

        let last: Option<String> = sqlx::query_scalar(
            r"
            SELECT order_number FROM customer_order
            WHERE order_number LIKE $1 || '-%'
            ORDER BY order_number DESC
            LIMIT 1
            FOR UPDATE
            ",
        )
        .bind(&prefix)
        .fetch_optional(&mut **tx)
        .await?;

        match last {
            Some(raw) => OrderNumber::parse(&raw)
                .and_then(|n| n.next())
                .map_err(|e| {
                    RepositoryError::DataCorruption(format!("bad order number {raw}: {e}"))
                }),
            None => Ok(OrderNumber::first_of_day(order_type, today)),
        }
    }

    /// Get an order with its items.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: OrderId) -> Result<Option<Order>, RepositoryError> {
        let query = format!("SELECT {ORDER_COLUMNS} FROM customer_order WHERE id = $1");
        let row = sqlx::query_as::<_, OrderRow>(&query)
            .bind(id.as_uuid())
            .fetch_optional(self.pool)
            .await?;

        match row {
            Some(r) => {
                let mut order: Order = r.try_into()?;
                order.items = self.items_for(id).await?;
                Ok(Some(order))
            }
            None => Ok(None),
        }
    }

    /// List orders for a customer email, most recent first, with items.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_email(&self, email: &Email) -> Result<Vec<Order>, RepositoryError> {
        let query = format!(
            r"
            SELECT {ORDER_COLUMNS} FROM customer_order
            WHERE LOWER(customer_email) = LOWER($1)
            ORDER BY created_at DESC
            "
        );
        let rows = sqlx::query_as::<_, OrderRow>(&query)
            .bind(email.as_str())
            .fetch_all(self.pool)
            .await?;

        self.attach_items(rows).await
    }

    /// List orders matching an admin filter, most recent first, with items.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self, filter: &OrderFilter) -> Result<Vec<Order>, RepositoryError> {
        let search = filter.search.as_ref().map(|s| format!("%{s}%"));
        let query = format!(
            r"
            SELECT {ORDER_COLUMNS} FROM customer_order
            WHERE ($1::TEXT IS NULL OR status = $1)
              AND ($2::TEXT IS NULL OR order_type = $2)
              AND ($3::TEXT IS NULL OR payment_status = $3)
              AND ($4::TEXT IS NULL OR order_number ILIKE $4 OR customer_email ILIKE $4)
            ORDER BY created_at DESC
            LIMIT $5
            "
        );
        let rows = sqlx::query_as::<_, OrderRow>(&query)
            .bind(filter.status.map(|s| s.to_string()))
            .bind(filter.order_type.map(|t| t.to_string()))
            .bind(filter.payment_status.map(|p| p.to_string()))
            .bind(&search)
            .bind(i64::from(filter.limit.clamp(1, 500)))
            .fetch_all(self.pool)
            .await?;

        self.attach_items(rows).await
    }

    /// Update an order's status (and optionally its payment status).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the order doesn't exist.
    pub async fn update_status(
        &self,
        id: OrderId,
        status: OrderStatus,
        payment_status: Option<PaymentStatus>,
    ) -> Result<Order, RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE customer_order
            SET status = $2,
                payment_status = COALESCE($3, payment_status),
                updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(id.as_uuid())
        .bind(status.to_string())
        .bind(payment_status.map(|p| p.to_string()))
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        self.get(id).await?.ok_or(RepositoryError::NotFound)
    }

    /// Attach a Stripe payment intent to an order and mark it paid.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the order doesn't exist.
    pub async fn attach_payment_intent(
        &self,
        id: OrderId,
        payment_intent_id: &str,
        payment_status: PaymentStatus,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE customer_order
            SET stripe_payment_intent_id = $2, payment_status = $3, updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(id.as_uuid())
        .bind(payment_intent_id)
        .bind(payment_status.to_string())
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    /// Delete an order and (via cascade) its items.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the order doesn't exist.
    pub async fn delete(&self, id: OrderId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM customer_order WHERE id = $1")
            .bind(id.as_uuid())
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    /// Delete a single order item.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the item doesn't exist.
    pub async fn delete_item(&self, item_id: OrderItemId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM order_item WHERE id = $1")
            .bind(item_id.as_i32())
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    /// List all order items across orders (admin view).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_items(&self, limit: u32) -> Result<Vec<OrderItem>, RepositoryError> {
        let rows = sqlx::query_as::<_, OrderItemRow>(
            r"
            SELECT id, order_id, product_name, product_image, unit_price, quantity,
                   customizations, total_price
            FROM order_item
            ORDER BY id DESC
            LIMIT $1
            ",
        )
        .bind(i64::from(limit.clamp(1, 1000)))
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Dashboard aggregates: order count, paid revenue, and pending count.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn stats(&self) -> Result<OrderStats, RepositoryError> {
        let row = sqlx::query_as::<_, OrderStatsRow>(
            r"
            SELECT COUNT(*) AS total_orders,
                   COALESCE(SUM(total) FILTER (WHERE payment_status = 'succeeded'), 0) AS revenue,
                   COUNT(*) FILTER (WHERE status = 'pending') AS pending_orders
            FROM customer_order
            ",
        )
        .fetch_one(self.pool)
        .await?;

        Ok(OrderStats {
            total_orders: row.total_orders,
            revenue: row.revenue,
            pending_orders: row.pending_orders,
        })
    }

    async fn items_for(&self, order_id: OrderId) -> Result<Vec<OrderItem>, RepositoryError> {
        let rows = sqlx::query_as::<_, OrderItemRow>(
            r"
            SELECT id, order_id, product_name, product_image, unit_price, quantity,
                   customizations, total_price
            FROM order_item
            WHERE order_id = $1
            ORDER BY id
            ",
        )
        .bind(order_id.as_uuid())
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn attach_items(&self, rows: Vec<OrderRow>) -> Result<Vec<Order>, RepositoryError> {
        let mut orders = Vec::with_capacity(rows.len());
        for row in rows {
            let mut order: Order = row.try_into()?;
            order.items = self.items_for(order.id).await?;
            orders.push(order);
        }
        Ok(orders)
    }
}

/// Aggregates for the admin dashboard.
#[derive(Debug, Clone, serde::Serialize)]
pub struct OrderStats {
    pub total_orders: i64,
    pub revenue: Money,
    pub pending_orders: i64,
}

#[derive(Debug, sqlx::FromRow)]
struct OrderStatsRow {
    total_orders: i64,
    revenue: Money,
    pending_orders: i64,
}
