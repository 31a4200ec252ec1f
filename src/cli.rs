use clap::{self, Parser, ValueEnum};
use rppal::spi::{Bus, SlaveSelect};
use wind_station::station::calibration::{DEFAULT_KPH_PER_COUNT_PER_SEC, DEFAULT_WINDOW_PERIOD_MS};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SpiBus {
    Spi0,
    Spi1,
}

impl From<SpiBus> for Bus {
    fn from(bus: SpiBus) -> Bus {
        match bus {
            SpiBus::Spi0 => Bus::Spi0,
            SpiBus::Spi1 => Bus::Spi1,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ChipSelect {
    Ce0,
    Ce1,
    Ce2,
}

impl From<ChipSelect> for SlaveSelect {
    fn from(cs: ChipSelect) -> SlaveSelect {
        match cs {
            ChipSelect::Ce0 => SlaveSelect::Ss0,
            ChipSelect::Ce1 => SlaveSelect::Ss1,
            ChipSelect::Ce2 => SlaveSelect::Ss2,
        }
    }
}

#[derive(Debug, Parser)]
#[command(long_about = None)]
pub struct Cli {
    /// milliseconds between readings
    #[arg(short, long, default_value_t = 1000)]
    pub interval_ms: u64,
    /// BCM pin of the anemometer reed switch
    #[arg(short = 'p', long, default_value_t = 27)]
    pub anemometer_pin: u8,
    /// MCP3008 channel of the wind vane
    #[arg(short = 'c', long, default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..8))]
    pub vane_channel: u8,
    #[arg(long, value_enum, default_value_t = SpiBus::Spi0)]
    pub spi_bus: SpiBus,
    #[arg(long, value_enum, default_value_t = ChipSelect::Ce0)]
    pub chip_select: ChipSelect,
    #[arg(long, default_value_t = 1_000_000)]
    pub spi_clock_hz: u32,
    /// reference voltage of the ADC, for debug output
    #[arg(long, default_value_t = 3300)]
    pub vref_mv: u32,
    /// length of the wind speed window
    #[arg(short, long, default_value_t = DEFAULT_WINDOW_PERIOD_MS, value_parser = clap::value_parser!(u32).range(1..))]
    pub window_ms: u32,
    #[arg(short, long, default_value_t = DEFAULT_KPH_PER_COUNT_PER_SEC)]
    pub kph_per_count_per_sec: f32,
    #[arg(short, long)]
    pub verbose: bool,
}
