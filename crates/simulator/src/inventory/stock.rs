use multirun_types::SimTime;

/// Stock level with its time integrals.
///
/// Holding and backlog areas are brought up to date lazily: every level
/// change first adds `level * elapsed` to the matching side.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Stock {
    level: i64,
    holding_area: f64,
    shortage_area: f64,
    last_change: SimTime,
    ordering_cost: f64,
}

impl Stock {
    /// Fresh position with `level` items on hand at time zero.
    pub fn new(level: i64) -> Self {
        Self {
            level,
            ..Default::default()
        }
    }

    /// Items on hand; negative when backlogged.
    pub fn level(&self) -> i64 {
        self.level
    }

    /// Total ordering cost paid so far.
    pub fn ordering_cost(&self) -> f64 {
        self.ordering_cost
    }

    /// Area under the positive part of the level up to `now`.
    pub fn holding_at(&self, now: SimTime) -> f64 {
        self.holding_area + self.level.max(0) as f64 * self.since(now)
    }

    /// Area under the negative part of the level up to `now`.
    pub fn shortage_at(&self, now: SimTime) -> f64 {
        self.shortage_area + (-self.level).max(0) as f64 * self.since(now)
    }

    /// Change the level by `delta` at `now`.
    pub fn adjust(&mut self, now: SimTime, delta: i64) {
        self.holding_area = self.holding_at(now);
        self.shortage_area = self.shortage_at(now);
        self.last_change = now.max(self.last_change);
        self.level += delta;
    }

    /// Take delivery of `amount` items that cost `cost`.
    pub fn receive(&mut self, now: SimTime, amount: u64, cost: f64) {
        self.ordering_cost += cost;
        self.adjust(now, amount as i64);
    }

    fn since(&self, now: SimTime) -> f64 {
        now.saturating_sub(self.last_change) as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_areas_split_by_sign() {
        let mut stock = Stock::new(2);
        stock.adjust(10, -5); // 2 held for 10 ticks, then 3 backlogged
        assert_eq!(stock.level(), -3);
        assert_eq!(stock.holding_at(20), 20.0);
        assert_eq!(stock.shortage_at(20), 30.0);
    }

    #[test]
    fn test_receive_adds_cost_and_items() {
        let mut stock = Stock::new(0);
        stock.receive(5, 40, 150.0);
        assert_eq!(stock.level(), 40);
        assert_eq!(stock.ordering_cost(), 150.0);
        assert_eq!(stock.holding_at(15), 400.0);
        assert_eq!(stock.shortage_at(15), 0.0);
    }
}
