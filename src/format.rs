use crate::config::SpeedUnit;

const BYTES_PER_MEGABYTE: f64 = 1_000_000.0;
const MEGABYTES_PER_GIGABYTE: f64 = 1_000.0;

/// Renders a throughput value under the selected unit, one decimal place.
pub fn format_rate(bytes_per_second: f64, unit: SpeedUnit) -> String {
    match unit {
        SpeedUnit::Bytes => {
            format!("{:.1} MB/s", bytes_per_second / BYTES_PER_MEGABYTE)
        }
        SpeedUnit::Bits => {
            format!("{:.1} Mbps", bytes_per_second * 8.0 / BYTES_PER_MEGABYTE)
        }
    }
}

/// Renders a byte total in decimal megabytes, switching to gigabytes with
/// two decimal places once the total passes 1000 MB.
pub fn format_total(bytes: u64) -> String {
    let megabytes = bytes as f64 / BYTES_PER_MEGABYTE;
    if megabytes > MEGABYTES_PER_GIGABYTE {
        format!("{:.2} GB", megabytes / MEGABYTES_PER_GIGABYTE)
    } else {
        format!("{megabytes:.1} MB")
    }
}
