//! # In-Memory Store
//!
//! [`Store`] test double used by the API integration tests (and handy for
//! local hacking without a MongoDB). One mutex guards all collections, so
//! the multi-step operations (`place_order`, `record_payment`) are atomic
//! here by construction.

use async_trait::async_trait;
use bson::oid::ObjectId;
use chef_core::{
    Meal, Order, OrderPlacement, Payment, PaymentReceipt, Role, ServiceError, ServiceResult,
    Store, UpdateSummary, User, PAYMENT_PAID,
};
use std::sync::{Mutex, MutexGuard};

#[derive(Default)]
struct Collections {
    users: Vec<User>,
    meals: Vec<Meal>,
    orders: Vec<Order>,
    payments: Vec<Payment>,
}

/// Mutex-guarded in-memory document store.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Collections>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Collections> {
        self.inner.lock().expect("store mutex poisoned")
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn create_user(&self, user: User) -> ServiceResult<Option<ObjectId>> {
        let mut inner = self.lock();
        if inner.users.iter().any(|u| u.email == user.email) {
            return Ok(None);
        }
        let id = ObjectId::new();
        let mut user = user;
        user.id = Some(id);
        inner.users.push(user);
        Ok(Some(id))
    }

    async fn list_users(&self) -> ServiceResult<Vec<User>> {
        Ok(self.lock().users.clone())
    }

    async fn find_user_by_email(&self, email: &str) -> ServiceResult<Option<User>> {
        Ok(self.lock().users.iter().find(|u| u.email == email).cloned())
    }

    async fn set_user_role(&self, id: &ObjectId, role: Role) -> ServiceResult<UpdateSummary> {
        let mut inner = self.lock();
        match inner.users.iter_mut().find(|u| u.id.as_ref() == Some(id)) {
            Some(user) => {
                let modified = u64::from(user.role != role);
                user.role = role;
                Ok(UpdateSummary {
                    matched: 1,
                    modified,
                })
            }
            None => Ok(UpdateSummary::default()),
        }
    }

    async fn insert_meal(&self, meal: Meal) -> ServiceResult<ObjectId> {
        let mut inner = self.lock();
        let id = ObjectId::new();
        let mut meal = meal;
        meal.id = Some(id);
        inner.meals.push(meal);
        Ok(id)
    }

    async fn list_meals(&self) -> ServiceResult<Vec<Meal>> {
        Ok(self.lock().meals.clone())
    }

    async fn find_meal(&self, id: &ObjectId) -> ServiceResult<Option<Meal>> {
        Ok(self
            .lock()
            .meals
            .iter()
            .find(|m| m.id.as_ref() == Some(id))
            .cloned())
    }

    async fn top_meals(&self, limit: i64) -> ServiceResult<Vec<Meal>> {
        let mut meals = self.lock().meals.clone();
        meals.sort_by(|a, b| b.orders.cmp(&a.orders));
        meals.truncate(limit.max(0) as usize);
        Ok(meals)
    }

    async fn meals_by_chef(&self, email: &str) -> ServiceResult<Vec<Meal>> {
        Ok(self
            .lock()
            .meals
            .iter()
            .filter(|m| m.chef_email == email)
            .cloned()
            .collect())
    }

    async fn delete_meal(&self, id: &ObjectId) -> ServiceResult<u64> {
        let mut inner = self.lock();
        let before = inner.meals.len();
        inner.meals.retain(|m| m.id.as_ref() != Some(id));
        Ok((before - inner.meals.len()) as u64)
    }

    async fn place_order(&self, order: Order) -> ServiceResult<OrderPlacement> {
        let mut inner = self.lock();
        if let Some(existing) = inner.orders.iter_mut().find(|o| {
            o.user_email == order.user_email && o.meal_id == order.meal_id && o.is_pending()
        }) {
            existing.merge_repeat(order.quantity, order.price, order.order_time);
            return Ok(OrderPlacement {
                merged: true,
                order: existing.clone(),
            });
        }

        let mut created = order;
        created.id = Some(ObjectId::new());
        inner.orders.push(created.clone());
        Ok(OrderPlacement {
            merged: false,
            order: created,
        })
    }

    async fn orders_by_user(&self, email: &str) -> ServiceResult<Vec<Order>> {
        Ok(self
            .lock()
            .orders
            .iter()
            .filter(|o| o.user_email == email)
            .cloned()
            .collect())
    }

    async fn orders_by_chef(&self, email: &str) -> ServiceResult<Vec<Order>> {
        // `chefId` documents deserialize into `chef_email` via the legacy
        // alias, so one field comparison covers the `$or` the production
        // store runs.
        Ok(self
            .lock()
            .orders
            .iter()
            .filter(|o| o.chef_email.as_deref() == Some(email))
            .cloned()
            .collect())
    }

    async fn find_order(&self, id: &ObjectId) -> ServiceResult<Option<Order>> {
        Ok(self
            .lock()
            .orders
            .iter()
            .find(|o| o.id.as_ref() == Some(id))
            .cloned())
    }

    async fn delete_order(&self, id: &ObjectId) -> ServiceResult<u64> {
        let mut inner = self.lock();
        let before = inner.orders.len();
        inner.orders.retain(|o| o.id.as_ref() != Some(id));
        Ok((before - inner.orders.len()) as u64)
    }

    async fn set_order_status(&self, id: &ObjectId, status: &str) -> ServiceResult<UpdateSummary> {
        let mut inner = self.lock();
        match inner.orders.iter_mut().find(|o| o.id.as_ref() == Some(id)) {
            Some(order) => {
                let modified = u64::from(order.order_status.as_deref() != Some(status));
                order.order_status = Some(status.to_string());
                Ok(UpdateSummary {
                    matched: 1,
                    modified,
                })
            }
            None => Ok(UpdateSummary::default()),
        }
    }

    async fn record_payment(&self, payment: Payment) -> ServiceResult<PaymentReceipt> {
        let order_id = ObjectId::parse_str(&payment.order_id).map_err(|_| {
            ServiceError::InvalidId {
                value: payment.order_id.clone(),
            }
        })?;

        let mut inner = self.lock();
        let order_updated = match inner
            .orders
            .iter_mut()
            .find(|o| o.id.as_ref() == Some(&order_id))
        {
            Some(order) => {
                order.payment_status = Some(PAYMENT_PAID.to_string());
                order.transaction_id = Some(payment.transaction_id.clone());
                true
            }
            None => false,
        };

        let payment_id = ObjectId::new();
        let mut payment = payment;
        payment.id = Some(payment_id);
        inner.payments.push(payment);

        Ok(PaymentReceipt {
            payment_id,
            order_updated,
        })
    }

    async fn payments_by_email(&self, email: &str) -> ServiceResult<Vec<Payment>> {
        Ok(self
            .lock()
            .payments
            .iter()
            .filter(|p| p.email == email)
            .cloned()
            .collect())
    }

    async fn list_payments(&self) -> ServiceResult<Vec<Payment>> {
        Ok(self.lock().payments.clone())
    }
}
