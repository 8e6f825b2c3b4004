//! Vitals Module
//!
//! Health, mana and stamina pools for living entities. Pools store a real
//! value so fractional regeneration accumulates; what the player sees is
//! always the floored value.
use serde::{Deserialize, Serialize};

/// A bounded resource: `0 <= current <= max` is enforced on every write.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pool {
    current: f64,
    max: f64,
}

impl Pool {
    /// A full pool with the given maximum.
    pub fn new(max: f64) -> Self {
        let max = max.max(0.0);
        Self { current: max, max }
    }

    pub fn current(&self) -> f64 {
        self.current
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    /// Integer view shown to players.
    #[allow(clippy::cast_possible_truncation)]
    pub fn display(&self) -> i64 {
        self.current.floor() as i64
    }

    /// Overwrite the current value, clamped into `[0, max]`.
    pub fn set(&mut self, value: f64) {
        self.current = value.clamp(0.0, self.max);
    }

    pub fn add(&mut self, amount: f64) {
        self.set(self.current + amount);
    }

    /// Subtract from the pool. Saturates at zero.
    pub fn drain(&mut self, amount: f64) {
        self.set(self.current - amount);
    }

    pub fn refill(&mut self) {
        self.current = self.max;
    }

    pub fn is_empty(&self) -> bool {
        self.current <= 0.0
    }
}

impl Default for Pool {
    fn default() -> Self {
        Pool::new(0.0)
    }
}

/// Amounts restored to each pool. Additive and clamped by the pools.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Recovery {
    pub hp: f64,
    pub mp: f64,
    pub sp: f64,
}

impl Recovery {
    pub fn new(hp: f64, mp: f64, sp: f64) -> Self {
        Self { hp, mp, sp }
    }

    pub fn is_zero(&self) -> bool {
        self.hp == 0.0 && self.mp == 0.0 && self.sp == 0.0
    }
}

/// The three resource pools of a character.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vitals {
    pub hp: Pool,
    pub mp: Pool,
    pub sp: Pool,
}

impl Vitals {
    pub fn new(max_hp: f64, max_mp: f64, max_sp: f64) -> Self {
        Self {
            hp: Pool::new(max_hp),
            mp: Pool::new(max_mp),
            sp: Pool::new(max_sp),
        }
    }

    pub fn recover(&mut self, amount: Recovery) {
        self.hp.add(amount.hp);
        self.mp.add(amount.mp);
        self.sp.add(amount.sp);
    }

    pub fn refill(&mut self) {
        self.hp.refill();
        self.mp.refill();
        self.sp.refill();
    }

    pub fn life_state(&self) -> LifeState {
        if self.hp.is_empty() {
            LifeState::Dead
        } else {
            LifeState::Alive
        }
    }
}

/// Possible life states for living entities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, variantly::Variantly)]
pub enum LifeState {
    Alive,
    Dead,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_saturates_at_max() {
        let mut pool = Pool::new(10.0);
        pool.drain(5.0);
        pool.add(3.0);
        assert_eq!(pool.display(), 8);

        pool.add(10.0);
        assert_eq!(pool.display(), 10);
        assert!((pool.current() - pool.max()).abs() < f64::EPSILON);
    }

    #[test]
    fn drain_saturates_at_zero() {
        let mut pool = Pool::new(10.0);
        pool.drain(25.0);
        assert_eq!(pool.display(), 0);
        assert!(pool.is_empty());
    }

    #[test]
    fn fractional_regeneration_accumulates() {
        let mut pool = Pool::new(10.0);
        pool.set(4.0);
        pool.add(0.5);
        assert_eq!(pool.display(), 4);
        pool.add(0.5);
        assert_eq!(pool.display(), 5);
    }

    #[test]
    fn display_is_floor_of_internal_value() {
        let mut pool = Pool::new(10.0);
        pool.set(7.99);
        assert_eq!(pool.display(), 7);
    }

    #[test]
    fn recover_is_clamped_per_pool() {
        let mut vitals = Vitals::new(20.0, 10.0, 5.0);
        vitals.hp.drain(15.0);
        vitals.mp.drain(10.0);
        vitals.recover(Recovery::new(5.0, 50.0, 1.0));
        assert_eq!(vitals.hp.display(), 10);
        assert_eq!(vitals.mp.display(), 10);
        assert_eq!(vitals.sp.display(), 5);
    }

    #[test]
    fn life_state_follows_hp() {
        let mut vitals = Vitals::new(3.0, 0.0, 0.0);
        assert!(vitals.life_state().is_alive());
        vitals.hp.drain(3.0);
        assert!(vitals.life_state().is_dead());
        vitals.refill();
        assert!(vitals.life_state().is_alive());
    }
}
