//! # MongoDB Store
//!
//! Production [`Store`] implementation over the MongoDB driver.
//!
//! Two operations need more than a single driver call:
//! - `place_order` is one conditional write: an aggregation-pipeline upsert
//!   keyed on `(userEmail, mealId, status="pending")`, backed by a partial
//!   unique index, so concurrent placements cannot race into duplicate
//!   pending documents or lost merges.
//! - `record_payment` wraps its two writes (payment insert, order update) in
//!   a multi-document transaction, which requires a replica-set deployment.

use async_trait::async_trait;
use bson::oid::ObjectId;
use bson::{doc, Bson, Document};
use chef_core::{
    Meal, Order, OrderPlacement, Payment, PaymentReceipt, Role, ServiceError, ServiceResult,
    Store, UpdateSummary, User, ORDER_PENDING, PAYMENT_PAID,
};
use futures::TryStreamExt;
use mongodb::options::{ClientOptions, IndexOptions, ServerApi, ServerApiVersion, UpdateModifications};
use mongodb::{Client, Collection, Database, IndexModel};
use tracing::{debug, info};

const COLL_USERS: &str = "users";
const COLL_MEALS: &str = "meals";
const COLL_ORDERS: &str = "orders";
const COLL_PAYMENTS: &str = "payments";

/// MongoDB-backed document store.
#[derive(Clone)]
pub struct MongoStore {
    client: Client,
    db: Database,
}

impl MongoStore {
    /// Connect with stable API V1 (strict), ping the deployment, and ensure
    /// the pending-order merge index exists.
    pub async fn connect(uri: &str, database: &str) -> ServiceResult<Self> {
        let mut options = ClientOptions::parse(uri).await.map_err(store_err)?;
        options.server_api = Some(
            ServerApi::builder()
                .version(ServerApiVersion::V1)
                .strict(true)
                .deprecation_errors(true)
                .build(),
        );

        let client = Client::with_options(options).map_err(store_err)?;
        client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(store_err)?;
        info!("connected to document store, database={}", database);

        let store = Self {
            db: client.database(database),
            client,
        };
        store.ensure_indexes().await?;
        Ok(store)
    }

    /// Partial unique index over pending orders: the invariant behind the
    /// at-most-one-merge guarantee of `place_order`.
    async fn ensure_indexes(&self) -> ServiceResult<()> {
        let index = IndexModel::builder()
            .keys(doc! { "userEmail": 1, "mealId": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .partial_filter_expression(doc! { "status": ORDER_PENDING })
                    .build(),
            )
            .build();
        self.orders().create_index(index).await.map_err(store_err)?;
        Ok(())
    }

    fn users(&self) -> Collection<User> {
        self.db.collection(COLL_USERS)
    }

    fn meals(&self) -> Collection<Meal> {
        self.db.collection(COLL_MEALS)
    }

    fn orders(&self) -> Collection<Order> {
        self.db.collection(COLL_ORDERS)
    }

    fn payments(&self) -> Collection<Payment> {
        self.db.collection(COLL_PAYMENTS)
    }
}

/// Build the merge-or-insert pipeline for `place_order`.
///
/// The upsert base document built from the filter has no `quantity`, so the
/// `$cond` falls through to the full insert document; an existing pending
/// order takes the merge branch, recomputing `totalPrice` from the incoming
/// unit price times the combined quantity.
fn upsert_pipeline(order: &Order) -> ServiceResult<Vec<Document>> {
    let new_doc = bson::to_document(order).map_err(ser_err)?;
    let order_time = new_doc.get("orderTime").cloned().unwrap_or(Bson::Null);

    Ok(vec![doc! {
        "$replaceWith": {
            "$cond": {
                "if": { "$gt": ["$quantity", Bson::Null] },
                "then": { "$mergeObjects": ["$$ROOT", {
                    "quantity": { "$add": ["$quantity", order.quantity] },
                    "price": { "$add": ["$price", order.price] },
                    "totalPrice": {
                        "$multiply": [order.price, { "$add": ["$quantity", order.quantity] }]
                    },
                    "orderTime": order_time,
                }]},
                "else": new_doc,
            }
        }
    }])
}

#[async_trait]
impl Store for MongoStore {
    async fn create_user(&self, user: User) -> ServiceResult<Option<ObjectId>> {
        let query = doc! { "email": &user.email };
        if self.users().find_one(query).await.map_err(store_err)?.is_some() {
            return Ok(None);
        }
        let result = self.users().insert_one(&user).await.map_err(store_err)?;
        object_id(result.inserted_id).map(Some)
    }

    async fn list_users(&self) -> ServiceResult<Vec<User>> {
        let cursor = self.users().find(doc! {}).await.map_err(store_err)?;
        cursor.try_collect().await.map_err(store_err)
    }

    async fn find_user_by_email(&self, email: &str) -> ServiceResult<Option<User>> {
        self.users()
            .find_one(doc! { "email": email })
            .await
            .map_err(store_err)
    }

    async fn set_user_role(&self, id: &ObjectId, role: Role) -> ServiceResult<UpdateSummary> {
        let role = bson::to_bson(&role).map_err(ser_err)?;
        let result = self
            .users()
            .update_one(doc! { "_id": id }, doc! { "$set": { "role": role } })
            .await
            .map_err(store_err)?;
        Ok(UpdateSummary {
            matched: result.matched_count,
            modified: result.modified_count,
        })
    }

    async fn insert_meal(&self, meal: Meal) -> ServiceResult<ObjectId> {
        let result = self.meals().insert_one(&meal).await.map_err(store_err)?;
        object_id(result.inserted_id)
    }

    async fn list_meals(&self) -> ServiceResult<Vec<Meal>> {
        let cursor = self.meals().find(doc! {}).await.map_err(store_err)?;
        cursor.try_collect().await.map_err(store_err)
    }

    async fn find_meal(&self, id: &ObjectId) -> ServiceResult<Option<Meal>> {
        self.meals()
            .find_one(doc! { "_id": id })
            .await
            .map_err(store_err)
    }

    async fn top_meals(&self, limit: i64) -> ServiceResult<Vec<Meal>> {
        let cursor = self
            .meals()
            .find(doc! {})
            .sort(doc! { "orders": -1 })
            .limit(limit)
            .await
            .map_err(store_err)?;
        cursor.try_collect().await.map_err(store_err)
    }

    async fn meals_by_chef(&self, email: &str) -> ServiceResult<Vec<Meal>> {
        let cursor = self
            .meals()
            .find(doc! { "chefEmail": email })
            .await
            .map_err(store_err)?;
        cursor.try_collect().await.map_err(store_err)
    }

    async fn delete_meal(&self, id: &ObjectId) -> ServiceResult<u64> {
        let result = self
            .meals()
            .delete_one(doc! { "_id": id })
            .await
            .map_err(store_err)?;
        Ok(result.deleted_count)
    }

    async fn place_order(&self, order: Order) -> ServiceResult<OrderPlacement> {
        let filter = doc! {
            "userEmail": &order.user_email,
            "mealId": &order.meal_id,
            "status": ORDER_PENDING,
        };
        let pipeline = upsert_pipeline(&order)?;

        let result = self
            .orders()
            .update_one(filter.clone(), UpdateModifications::Pipeline(pipeline))
            .upsert(true)
            .await
            .map_err(store_err)?;

        match result.upserted_id {
            Some(id) => {
                debug!(user = %order.user_email, meal = %order.meal_id, "order created");
                let mut created = order;
                created.id = Some(object_id(id)?);
                Ok(OrderPlacement {
                    merged: false,
                    order: created,
                })
            }
            None => {
                debug!(user = %order.user_email, meal = %order.meal_id, "order merged");
                let merged = self
                    .orders()
                    .find_one(filter)
                    .await
                    .map_err(store_err)?
                    .ok_or_else(|| {
                        ServiceError::Store("merged pending order no longer present".to_string())
                    })?;
                Ok(OrderPlacement {
                    merged: true,
                    order: merged,
                })
            }
        }
    }

    async fn orders_by_user(&self, email: &str) -> ServiceResult<Vec<Order>> {
        let cursor = self
            .orders()
            .find(doc! { "userEmail": email })
            .await
            .map_err(store_err)?;
        cursor.try_collect().await.map_err(store_err)
    }

    async fn orders_by_chef(&self, email: &str) -> ServiceResult<Vec<Order>> {
        // Legacy documents carried the chef's email under `chefId`.
        let query = doc! {
            "$or": [
                { "chefId": email },
                { "chefEmail": email },
            ]
        };
        let cursor = self.orders().find(query).await.map_err(store_err)?;
        cursor.try_collect().await.map_err(store_err)
    }

    async fn find_order(&self, id: &ObjectId) -> ServiceResult<Option<Order>> {
        self.orders()
            .find_one(doc! { "_id": id })
            .await
            .map_err(store_err)
    }

    async fn delete_order(&self, id: &ObjectId) -> ServiceResult<u64> {
        let result = self
            .orders()
            .delete_one(doc! { "_id": id })
            .await
            .map_err(store_err)?;
        Ok(result.deleted_count)
    }

    async fn set_order_status(&self, id: &ObjectId, status: &str) -> ServiceResult<UpdateSummary> {
        let result = self
            .orders()
            .update_one(doc! { "_id": id }, doc! { "$set": { "orderStatus": status } })
            .await
            .map_err(store_err)?;
        Ok(UpdateSummary {
            matched: result.matched_count,
            modified: result.modified_count,
        })
    }

    async fn record_payment(&self, payment: Payment) -> ServiceResult<PaymentReceipt> {
        let order_id = ObjectId::parse_str(&payment.order_id).map_err(|_| {
            ServiceError::InvalidId {
                value: payment.order_id.clone(),
            }
        })?;

        // Both writes commit together; dropping the session on an early
        // return aborts the transaction.
        let mut session = self.client.start_session().await.map_err(store_err)?;
        session.start_transaction().await.map_err(store_err)?;

        let insert = self
            .payments()
            .insert_one(&payment)
            .session(&mut session)
            .await
            .map_err(store_err)?;
        let update = self
            .orders()
            .update_one(
                doc! { "_id": order_id },
                doc! { "$set": {
                    "paymentStatus": PAYMENT_PAID,
                    "transactionId": &payment.transaction_id,
                }},
            )
            .session(&mut session)
            .await
            .map_err(store_err)?;

        session.commit_transaction().await.map_err(store_err)?;

        Ok(PaymentReceipt {
            payment_id: object_id(insert.inserted_id)?,
            order_updated: update.matched_count > 0,
        })
    }

    async fn payments_by_email(&self, email: &str) -> ServiceResult<Vec<Payment>> {
        let cursor = self
            .payments()
            .find(doc! { "email": email })
            .await
            .map_err(store_err)?;
        cursor.try_collect().await.map_err(store_err)
    }

    async fn list_payments(&self) -> ServiceResult<Vec<Payment>> {
        let cursor = self.payments().find(doc! {}).await.map_err(store_err)?;
        cursor.try_collect().await.map_err(store_err)
    }
}

fn store_err(err: mongodb::error::Error) -> ServiceError {
    ServiceError::Store(err.to_string())
}

fn ser_err(err: bson::ser::Error) -> ServiceError {
    ServiceError::Serialization(err.to_string())
}

fn object_id(id: Bson) -> ServiceResult<ObjectId> {
    match id {
        Bson::ObjectId(oid) => Ok(oid),
        other => Err(ServiceError::Store(format!(
            "store returned a non-ObjectId document id: {}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn sample_order() -> Order {
        Order::pending(
            "a@x.com",
            "65f000000000000000000001",
            Some("Biryani".into()),
            Some("chef@x.com".into()),
            2,
            5.0,
            Utc::now(),
        )
    }

    #[test]
    fn test_upsert_pipeline_shape() {
        let order = sample_order();
        let pipeline = upsert_pipeline(&order).unwrap();
        assert_eq!(pipeline.len(), 1);

        let cond = pipeline[0]
            .get_document("$replaceWith")
            .unwrap()
            .get_document("$cond")
            .unwrap();

        // Insert branch carries the full stamped document.
        let insert = cond.get_document("else").unwrap();
        assert_eq!(insert.get_str("status").unwrap(), ORDER_PENDING);
        assert_eq!(insert.get_str("userEmail").unwrap(), "a@x.com");
        assert_eq!(insert.get_f64("totalPrice").unwrap(), 10.0);
        assert!(!insert.contains_key("_id"));

        // Merge branch recomputes the total from the incoming unit price.
        let merge = cond.get_document("then").unwrap();
        let overlay = merge.get_array("$mergeObjects").unwrap()[1]
            .as_document()
            .unwrap();
        let multiply = overlay
            .get_document("totalPrice")
            .unwrap()
            .get_array("$multiply")
            .unwrap();
        assert_eq!(multiply[0], Bson::Double(5.0));
    }

    #[test]
    fn test_object_id_rejects_other_bson() {
        assert!(object_id(Bson::Int32(7)).is_err());
        let oid = ObjectId::new();
        assert_eq!(object_id(Bson::ObjectId(oid)).unwrap(), oid);
    }
}
