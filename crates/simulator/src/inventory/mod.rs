//! Single-item inventory model with periodic review.
//!
//! Customers arrive with negative-exponential gaps and take 1 to 4 items.
//! Every month the stock is reviewed; below the reorder point an order
//! brings the position back up to the order-up-to level after a random
//! lead time. Ordering, holding and backlog costs are tracked per
//! replication and sampled at every monitor instant.
//!
//! Outstanding orders sit in the `orders` queue, so the harness also
//! reports how many orders are in flight and how long they take.

mod stock;

pub use stock::Stock;

use crate::config::InventoryConfig;
use multirun_core::Engine;
use multirun_engine::SmplEngine;
use multirun_simulation::{HandlerResult, HandlerTable};
use multirun_types::{Event, EventId, QueueId, ReplicationIndex, ResourceNames, SimTime};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Name of the queue holding outstanding orders.
pub const ORDERS_QUEUE: &str = "orders";

const ORDERS: QueueId = QueueId(0);

/// Model events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InventoryEvent {
    /// Resets the model and arms the first demand, review and end.
    Start = 1,
    /// A customer demand.
    Generate = 2,
    /// An order is delivered; the payload is the amount.
    GetOrder = 3,
    /// Monthly stock review.
    Check = 4,
}

impl InventoryEvent {
    /// Engine event id.
    pub const fn id(self) -> EventId {
        EventId(self as u64)
    }
}

/// Resources the model declares to the harness.
pub fn resources() -> ResourceNames {
    ResourceNames::new().with_queue(ORDERS_QUEUE)
}

/// Handler table covering every model event and both reserved events.
pub fn handlers() -> HandlerTable<InventoryModel, SmplEngine> {
    HandlerTable::new()
        .on(InventoryEvent::Start.id(), on_start)
        .on(InventoryEvent::Generate.id(), on_generate)
        .on(InventoryEvent::GetOrder.id(), on_get_order)
        .on(InventoryEvent::Check.id(), on_check)
        .on(EventId::MONITOR, on_monitor)
        .on(EventId::END, on_end)
}

/// End-of-replication figures.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ReplicationOutcome {
    /// Ordering cost per month.
    pub ordering_cost_per_month: f64,
    /// Stock on hand (negative when backlogged).
    pub final_stock: f64,
    /// Time-average items on hand.
    pub avg_holding: f64,
    /// Time-average items backlogged.
    pub avg_shortage: f64,
    /// Ordering, holding and backlog cost per month.
    pub total_cost_per_month: f64,
}

impl ReplicationOutcome {
    /// Field-wise mean, or `None` for an empty slice.
    pub fn mean(outcomes: &[Self]) -> Option<Self> {
        if outcomes.is_empty() {
            return None;
        }
        let n = outcomes.len() as f64;
        let sum = |f: fn(&Self) -> f64| outcomes.iter().map(f).sum::<f64>() / n;
        Some(Self {
            ordering_cost_per_month: sum(|o| o.ordering_cost_per_month),
            final_stock: sum(|o| o.final_stock),
            avg_holding: sum(|o| o.avg_holding),
            avg_shortage: sum(|o| o.avg_shortage),
            total_cost_per_month: sum(|o| o.total_cost_per_month),
        })
    }
}

/// Model state carried across handler calls.
///
/// `stock` is reset by the start event of every replication; `costs` and
/// `outcomes` collect results of all replications.
#[derive(Debug)]
pub struct InventoryModel {
    config: InventoryConfig,
    stock: Stock,
    /// Monthly cost per replication, indexed by monitor instant.
    costs: Vec<Vec<f64>>,
    outcomes: Vec<ReplicationOutcome>,
}

impl InventoryModel {
    /// Create a model with `config`.
    pub fn new(config: InventoryConfig) -> Self {
        let stock = Stock::new(config.initial_stock);
        Self {
            config,
            stock,
            costs: Vec::new(),
            outcomes: Vec::new(),
        }
    }

    /// Model parameters.
    pub fn config(&self) -> &InventoryConfig {
        &self.config
    }

    /// Current stock position.
    pub fn stock(&self) -> &Stock {
        &self.stock
    }

    /// Monthly cost series of every replication.
    pub fn costs(&self) -> &[Vec<f64>] {
        &self.costs
    }

    /// Outcomes of every finished replication.
    pub fn outcomes(&self) -> &[ReplicationOutcome] {
        &self.outcomes
    }

    /// Consume the model, returning per-replication costs and outcomes.
    ///
    /// Every cost row is padded with zeros to one entry per configured
    /// monitor interval. With the default schedule the last instant falls on
    /// the end event, which fires first, so that column stays zero.
    pub fn into_results(mut self) -> (Vec<Vec<f64>>, Vec<ReplicationOutcome>) {
        let columns = self.config.monitor_months.len();
        if self.costs.len() < self.outcomes.len() {
            self.costs.resize(self.outcomes.len(), Vec::new());
        }
        for series in &mut self.costs {
            if series.len() < columns {
                series.resize(columns, 0.0);
            }
        }
        (self.costs, self.outcomes)
    }

    /// Ordering plus holding plus backlog cost per month, as of `now`.
    pub fn monthly_cost(&self, now: SimTime) -> f64 {
        let t = now as f64;
        self.stock.ordering_cost() * self.config.scale as f64 / t
            + self.stock.holding_at(now) / t * self.config.holding_cost
            + self.stock.shortage_at(now) / t * self.config.shortage_cost
    }

    /// Demand size for a uniform draw in `[0, 1)`.
    pub fn demand_size(&self, u: f64) -> i64 {
        let cumulative = self.config.demand_distribution;
        match cumulative.iter().position(|&p| u <= p) {
            Some(i) => i as i64 + 1,
            None => 4,
        }
    }

    fn record_cost(&mut self, replication: ReplicationIndex, index: usize, cost: f64) {
        if self.costs.len() <= replication {
            self.costs.resize(replication + 1, Vec::new());
        }
        let series = &mut self.costs[replication];
        if series.len() <= index {
            series.resize(index + 1, 0.0);
        }
        series[index] = cost;
    }

    fn outcome(&self, now: SimTime) -> ReplicationOutcome {
        let t = now as f64;
        let avg_holding = self.stock.holding_at(now) / t;
        let avg_shortage = self.stock.shortage_at(now) / t;
        let ordering_cost_per_month = self.stock.ordering_cost() / self.config.months as f64;
        ReplicationOutcome {
            ordering_cost_per_month,
            final_stock: self.stock.level() as f64,
            avg_holding,
            avg_shortage,
            total_cost_per_month: ordering_cost_per_month
                + avg_holding * self.config.holding_cost
                + avg_shortage * self.config.shortage_cost,
        }
    }

    fn demand_delay(&self, engine: &mut SmplEngine) -> SimTime {
        engine.neg_exp(self.config.ticks(self.config.demand_interval) as f64)
    }
}

fn on_start(
    model: &mut InventoryModel,
    _event: &Event,
    _replication: ReplicationIndex,
    engine: &mut SmplEngine,
) -> HandlerResult {
    model.stock = Stock::new(model.config.initial_stock);
    let delay = model.demand_delay(engine);
    engine.schedule(InventoryEvent::Generate.id(), delay, 1);
    engine.schedule(InventoryEvent::Check.id(), 0, 1);
    engine.schedule(EventId::END, model.config.end_time(), 1);
    Ok(())
}

fn on_generate(
    model: &mut InventoryModel,
    event: &Event,
    _replication: ReplicationIndex,
    engine: &mut SmplEngine,
) -> HandlerResult {
    let u = engine.uniform();
    let size = model.demand_size(u);
    model.stock.adjust(engine.time(), -size);
    let delay = model.demand_delay(engine);
    engine.schedule(InventoryEvent::Generate.id(), delay, event.transact + 1);
    Ok(())
}

fn on_get_order(
    model: &mut InventoryModel,
    event: &Event,
    _replication: ReplicationIndex,
    engine: &mut SmplEngine,
) -> HandlerResult {
    let amount = event.transact;
    let cost = model.config.setup_cost + model.config.unit_cost * amount as f64;
    model.stock.receive(engine.time(), amount, cost);
    engine.dequeue(ORDERS)?;
    trace!(amount, time = engine.time(), "Order delivered");
    Ok(())
}

fn on_check(
    model: &mut InventoryModel,
    _event: &Event,
    _replication: ReplicationIndex,
    engine: &mut SmplEngine,
) -> HandlerResult {
    let config = &model.config;
    if model.stock.level() < config.reorder_level {
        let amount = (config.max_stock - model.stock.level()).max(0) as u64;
        let lead_time =
            engine.uniform_int(config.ticks(config.min_lead_time), config.ticks(config.max_lead_time));
        engine.schedule(InventoryEvent::GetOrder.id(), lead_time, amount);
        engine.enqueue(ORDERS, amount)?;
        trace!(amount, lead_time, time = engine.time(), "Order placed");
    }
    engine.schedule(InventoryEvent::Check.id(), config.scale, 1);
    Ok(())
}

fn on_monitor(
    model: &mut InventoryModel,
    event: &Event,
    replication: ReplicationIndex,
    engine: &mut SmplEngine,
) -> HandlerResult {
    let cost = model.monthly_cost(engine.time());
    model.record_cost(replication, event.transact as usize, cost);
    Ok(())
}

fn on_end(
    model: &mut InventoryModel,
    _event: &Event,
    _replication: ReplicationIndex,
    engine: &mut SmplEngine,
) -> HandlerResult {
    let outcome = model.outcome(engine.time());
    model.outcomes.push(outcome);
    Ok(())
}
