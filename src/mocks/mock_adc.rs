// This file is only compiled during tests

use std::cell::RefCell;
use std::collections::VecDeque;

use super::MockError;
use crate::hal::Adc;

thread_local! {
    static MOCK_SAMPLES: RefCell<VecDeque<Option<i32>>> = RefCell::new(VecDeque::new());
}

pub struct MockAdc {
    fail_setup: bool,
    resolution_bits: u8,
}

impl MockAdc {
    pub fn new() -> Self {
        MockAdc {
            fail_setup: false,
            resolution_bits: 10,
        }
    }

    pub fn with_resolution(resolution_bits: u8) -> Self {
        MockAdc {
            fail_setup: false,
            resolution_bits,
        }
    }

    pub fn failing_setup() -> Self {
        MockAdc {
            fail_setup: true,
            resolution_bits: 10,
        }
    }
}

impl Adc for MockAdc {
    type Error = MockError;

    fn setup_channel(&mut self, _channel: u8) -> Result<(), MockError> {
        if self.fail_setup {
            Err(MockError)
        } else {
            Ok(())
        }
    }

    fn read(&mut self, _channel: u8) -> Result<i32, MockError> {
        MOCK_SAMPLES
            .with(|samples| samples.borrow_mut().pop_front())
            .flatten()
            .ok_or(MockError)
    }

    fn resolution_bits(&self) -> u8 {
        self.resolution_bits
    }
}

// test helper to queue the next sample
pub fn push_mock_sample(sample: i32) {
    MOCK_SAMPLES.with(|samples| samples.borrow_mut().push_back(Some(sample)));
}

// test helper to make the next read fail
pub fn push_mock_failure() {
    MOCK_SAMPLES.with(|samples| samples.borrow_mut().push_back(None));
}

// test helper to reset the queue
pub fn reset_mock_samples() {
    MOCK_SAMPLES.with(|samples| samples.borrow_mut().clear());
}
