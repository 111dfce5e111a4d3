use super::{Memory, Stack};
use crate::lang::Error;

type Result<T> = std::result::Result<T, Error>;

pub const STACK_SIZE: usize = 1024;
pub const MEMORY_SIZE: usize = 1024;

/// ## Stack machine core
///
/// One operand stack and one memory, owned together. Sequencing the
/// primitives is left to the caller; see [`Runtime`](super::Runtime)
/// for the dispatch loop that drives a linked program.

#[derive(Debug)]
pub struct Machine {
    stack: Stack<i64>,
    memory: Memory,
}

impl Default for Machine {
    fn default() -> Self {
        Machine::with_capacity(STACK_SIZE, MEMORY_SIZE)
    }
}

impl Machine {
    pub fn new() -> Machine {
        Machine::default()
    }

    pub fn with_capacity(stack_size: usize, memory_size: usize) -> Machine {
        Machine {
            stack: Stack::new(stack_size),
            memory: Memory::new(memory_size),
        }
    }

    pub fn stack(&self) -> &Stack<i64> {
        &self.stack
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    /// Fails with `StackOverflow` when full; nothing is appended.
    pub fn push(&mut self, value: i64) -> Result<()> {
        self.stack.push(value)
    }

    /// Fails with `StackUnderflow` when empty.
    pub fn pop(&mut self) -> Result<i64> {
        self.stack.pop()
    }

    /// Pops `b` then `a`, returning `(a, b)`.
    pub fn pop_2(&mut self) -> Result<(i64, i64)> {
        self.stack.pop_2()
    }

    /// Out of range addresses are ignored without error.
    pub fn store(&mut self, address: i64, value: i64) {
        self.memory.store(address, value)
    }

    /// Out of range addresses read as 0.
    pub fn load(&self, address: i64) -> i64 {
        self.memory.load(address)
    }

    pub fn compare_less_or_equal(a: i64, b: i64) -> bool {
        a <= b
    }

    pub fn compare_greater_or_equal(a: i64, b: i64) -> bool {
        a >= b
    }

    pub fn compare_equal(a: i64, b: i64) -> bool {
        a == b
    }

    pub fn compare_less(a: i64, b: i64) -> bool {
        a < b
    }

    pub fn compare_greater(a: i64, b: i64) -> bool {
        a > b
    }

    /// True when the zero path is taken.
    pub fn branch_if_zero(flag: i64) -> bool {
        flag == 0
    }

    pub fn clear(&mut self) {
        self.stack.clear();
        self.memory = Memory::new(self.memory.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::ErrorCode;
    use proptest::prelude::*;

    #[test]
    fn test_initial_state() {
        let m = Machine::new();
        assert!(m.stack().is_empty());
        assert_eq!(m.stack().capacity(), STACK_SIZE);
        assert_eq!(m.memory().len(), MEMORY_SIZE);
        assert_eq!(m.load(0), 0);
        assert_eq!(m.load(MEMORY_SIZE as i64 - 1), 0);
    }

    #[test]
    fn test_overflow_at_capacity() {
        let mut m = Machine::new();
        for i in 0..STACK_SIZE as i64 {
            m.push(i).unwrap();
        }
        let e = m.push(-1).unwrap_err();
        assert!(e.is(ErrorCode::StackOverflow));
        assert_eq!(e.to_string(), "Stack overflow");
        assert_eq!(m.stack().len(), STACK_SIZE);
        assert_eq!(m.pop().unwrap(), STACK_SIZE as i64 - 1);
    }

    #[test]
    fn test_underflow() {
        let mut m = Machine::new();
        let e = m.pop().unwrap_err();
        assert!(e.is(ErrorCode::StackUnderflow));
        assert_eq!(e.to_string(), "Stack underflow");
    }

    #[test]
    fn test_store_load_scenario() {
        let mut m = Machine::new();
        m.push(10).unwrap();
        m.push(0).unwrap();
        let addr = m.pop().unwrap();
        let val = m.pop().unwrap();
        m.store(addr, val);
        m.push(20).unwrap();
        m.push(1).unwrap();
        let addr = m.pop().unwrap();
        let val = m.pop().unwrap();
        m.store(addr, val);
        assert_eq!(m.load(0), 10);
        assert_eq!(m.load(1), 20);
        assert!(m.stack().is_empty());
        assert!(Machine::compare_less_or_equal(m.load(0), m.load(1)));
        assert!(Machine::compare_greater_or_equal(m.load(1), m.load(0)));
    }

    #[test]
    fn test_comparisons() {
        assert!(Machine::compare_less_or_equal(3, 3));
        assert!(!Machine::compare_less_or_equal(4, 3));
        assert!(Machine::compare_greater_or_equal(3, 3));
        assert!(!Machine::compare_greater_or_equal(-4, 3));
        assert!(Machine::compare_equal(-7, -7));
        assert!(Machine::compare_less(i64::min_value(), 0));
        assert!(Machine::compare_greater(1, 0));
        assert!(Machine::branch_if_zero(0));
        assert!(!Machine::branch_if_zero(-1));
    }

    #[test]
    fn test_independent_machines() {
        let mut a = Machine::new();
        let b = Machine::with_capacity(4, 4);
        a.store(2, 99);
        a.push(1).unwrap();
        assert_eq!(b.load(2), 0);
        assert!(b.stack().is_empty());
    }

    #[test]
    fn test_clear() {
        let mut m = Machine::with_capacity(4, 4);
        m.push(1).unwrap();
        m.store(3, 5);
        m.clear();
        assert!(m.stack().is_empty());
        assert_eq!(m.load(3), 0);
        assert_eq!(m.memory().len(), 4);
    }

    proptest! {
        #[test]
        fn prop_lifo(values in prop::collection::vec(any::<i64>(), 0..STACK_SIZE)) {
            let mut m = Machine::new();
            for v in &values {
                m.push(*v).unwrap();
            }
            for v in values.iter().rev() {
                prop_assert_eq!(m.pop().unwrap(), *v);
            }
            prop_assert!(m.stack().is_empty());
        }

        #[test]
        fn prop_push_pop_identity(prefix in prop::collection::vec(any::<i64>(), 0..16), v in any::<i64>()) {
            let mut m = Machine::new();
            for p in &prefix {
                m.push(*p).unwrap();
            }
            let before = m.stack().len();
            m.push(v).unwrap();
            prop_assert_eq!(m.pop().unwrap(), v);
            prop_assert_eq!(m.stack().len(), before);
        }

        #[test]
        fn prop_store_load(addr in 0i64..MEMORY_SIZE as i64, v in any::<i64>()) {
            let mut m = Machine::new();
            m.store(addr, v);
            prop_assert_eq!(m.load(addr), v);
        }

        #[test]
        fn prop_out_of_range_store_has_no_effect(
            addr in prop_oneof![i64::min_value()..0i64, MEMORY_SIZE as i64..i64::max_value()],
            v in any::<i64>(),
        ) {
            let mut m = Machine::new();
            m.store(addr, v);
            prop_assert_eq!(m.load(addr), 0);
            for a in 0..MEMORY_SIZE as i64 {
                prop_assert_eq!(m.load(a), 0);
            }
        }
    }
}
