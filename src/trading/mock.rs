//! Mock trading backend for unit testing.
//!
//! Records every call and answers from canned data so order flows can be
//! exercised without credentials or network access.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rust_decimal::Decimal;

use super::backend::TradingBackend;
use super::order::{Balance, CancelReport, OpenOrder, OrderAck, OrderArgs, TimeInForce};
use crate::error::TradingError;

/// A call received by the mock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockCall {
    /// `create_order` with its arguments.
    CreateOrder(OrderArgs),
    /// `post_order` with the order and time-in-force.
    PostOrder(OrderArgs, TimeInForce),
    /// `cancel` with the order ID.
    Cancel(String),
    /// `cancel_all`.
    CancelAll,
    /// `orders`.
    Orders,
    /// `balance`.
    Balance,
}

/// Configuration for mock backend behavior.
#[derive(Debug, Clone, Default)]
pub struct MockConfig {
    /// Balance to return.
    pub balance: Decimal,
    /// Whether to fail order creation.
    pub fail_create: bool,
    /// Whether to fail order posting.
    pub fail_post: bool,
    /// Whether to fail cancel requests.
    pub fail_cancel: bool,
    /// Whether to fail balance requests.
    pub fail_balance: bool,
}

/// Mock trading backend for testing.
#[derive(Debug, Clone, Default)]
pub struct MockTradingBackend {
    config: MockConfig,
    calls: Arc<Mutex<Vec<MockCall>>>,
    open_orders: Arc<Mutex<HashMap<String, OpenOrder>>>,
    /// Last order sequence number handed out; never reused.
    order_seq: Arc<AtomicU64>,
}

impl MockTradingBackend {
    /// Create a new mock backend with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock backend with custom configuration.
    pub fn with_config(config: MockConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Every call received so far, in order.
    pub fn calls(&self) -> Vec<MockCall> {
        self.lock_calls().clone()
    }

    /// Open orders currently held by the mock.
    pub fn open_order_count(&self) -> usize {
        self.lock_orders().len()
    }

    fn record(&self, call: MockCall) {
        self.lock_calls().push(call);
    }

    fn lock_calls(&self) -> std::sync::MutexGuard<'_, Vec<MockCall>> {
        self.calls.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn lock_orders(&self) -> std::sync::MutexGuard<'_, HashMap<String, OpenOrder>> {
        self.open_orders
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl TradingBackend for MockTradingBackend {
    type Order = OrderArgs;

    async fn create_order(&self, args: &OrderArgs) -> Result<OrderArgs, TradingError> {
        self.record(MockCall::CreateOrder(args.clone()));
        if self.config.fail_create {
            return Err(TradingError::SubmissionFailed(
                "Mock create failure".to_string(),
            ));
        }
        Ok(args.clone())
    }

    async fn post_order(
        &self,
        order: OrderArgs,
        time_in_force: TimeInForce,
    ) -> Result<OrderAck, TradingError> {
        self.record(MockCall::PostOrder(order.clone(), time_in_force));
        if self.config.fail_post {
            return Err(TradingError::SubmissionFailed("Mock post failure".to_string()));
        }

        let seq = self.order_seq.fetch_add(1, Ordering::Relaxed) + 1;
        let order_id = format!("0xmock{:04}", seq);
        self.lock_orders().insert(
            order_id.clone(),
            OpenOrder {
                id: order_id.clone(),
                status: "live".to_string(),
                asset_id: order.token_id,
                side: order.side.to_string(),
                price: order.price,
                original_size: order.size,
                size_matched: Decimal::ZERO,
            },
        );

        Ok(OrderAck {
            order_id,
            status: "live".to_string(),
            success: true,
        })
    }

    async fn cancel(&self, order_id: &str) -> Result<CancelReport, TradingError> {
        self.record(MockCall::Cancel(order_id.to_string()));
        if self.config.fail_cancel {
            return Err(TradingError::CancelFailed {
                order_id: order_id.to_string(),
                reason: "Mock cancel failure".to_string(),
            });
        }

        let mut report = CancelReport::default();
        if self.lock_orders().remove(order_id).is_some() {
            report.canceled.push(order_id.to_string());
        } else {
            report
                .not_canceled
                .insert(order_id.to_string(), "order not found".to_string());
        }
        Ok(report)
    }

    async fn cancel_all(&self) -> Result<CancelReport, TradingError> {
        self.record(MockCall::CancelAll);
        if self.config.fail_cancel {
            return Err(TradingError::CancelFailed {
                order_id: "all".to_string(),
                reason: "Mock cancel failure".to_string(),
            });
        }

        let mut canceled: Vec<String> = self.lock_orders().drain().map(|(id, _)| id).collect();
        canceled.sort();
        Ok(CancelReport {
            canceled,
            ..CancelReport::default()
        })
    }

    async fn orders(&self) -> Result<Vec<OpenOrder>, TradingError> {
        self.record(MockCall::Orders);
        let mut orders: Vec<OpenOrder> = self.lock_orders().values().cloned().collect();
        orders.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(orders)
    }

    async fn balance(&self) -> Result<Balance, TradingError> {
        self.record(MockCall::Balance);
        if self.config.fail_balance {
            return Err(TradingError::Backend("Mock balance failure".to_string()));
        }
        Ok(Balance {
            balance: self.config.balance,
            allowances: HashMap::new(),
        })
    }
}
