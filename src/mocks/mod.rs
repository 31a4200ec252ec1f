// This module is only compiled during tests

pub mod mock_adc;
pub mod mock_clock;
pub mod mock_gpio;

#[derive(Debug, thiserror::Error)]
#[error("mock device not ready")]
pub struct MockError;
