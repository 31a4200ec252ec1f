// This file is only compiled during tests

use std::cell::RefCell;
use std::collections::HashMap;

use super::MockError;
use crate::hal::{EdgeSource, PulseHandler};

thread_local! {
    static MOCK_HANDLERS: RefCell<HashMap<u8, PulseHandler>> = RefCell::new(HashMap::new());
}

pub struct MockEdges {
    fail: bool,
}

impl MockEdges {
    pub fn new() -> Self {
        MockEdges { fail: false }
    }

    pub fn failing() -> Self {
        MockEdges { fail: true }
    }
}

impl EdgeSource for MockEdges {
    type Error = MockError;

    fn subscribe(&mut self, pin: u8, handler: PulseHandler) -> Result<(), MockError> {
        if self.fail {
            return Err(MockError);
        }
        MOCK_HANDLERS.with(|handlers| {
            handlers.borrow_mut().insert(pin, handler);
        });
        Ok(())
    }
}

// test helper to toggle a pin `edges` times
pub fn fire_mock_edges(pin: u8, edges: u32) {
    MOCK_HANDLERS.with(|handlers| {
        if let Some(handler) = handlers.borrow_mut().get_mut(&pin) {
            for _ in 0..edges {
                handler();
            }
        }
    });
}

pub fn is_mock_pin_subscribed(pin: u8) -> bool {
    MOCK_HANDLERS.with(|handlers| handlers.borrow().contains_key(&pin))
}

// test helper to drop all handlers
pub fn reset_mock_handlers() {
    MOCK_HANDLERS.with(|handlers| {
        handlers.borrow_mut().clear();
    });
}
