use crate::config::Thresholds;
use crate::snapshot::Snapshot;

const BYTES_PER_MIB: f64 = 1_048_576.0;
const BYTES_PER_SEC_PER_MBIT: f64 = 125_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlertKind {
    Load,
    Memory,
    Disk,
    Network,
}

#[derive(Debug, Clone)]
pub struct Alert {
    pub kind: AlertKind,
    pub text: String,
}

pub trait AlertSink {
    fn emit(&mut self, line: &str);
}

pub struct StdoutSink;

impl AlertSink for StdoutSink {
    fn emit(&mut self, line: &str) {
        println!("{line}");
    }
}

pub fn evaluate(snapshot: &Snapshot, thresholds: &Thresholds) -> Vec<Alert> {
    let mut out = Vec::new();

    if snapshot.load_average > thresholds.load_average {
        out.push(Alert {
            kind: AlertKind::Load,
            text: format!("Load Average is too high: {:.0}", snapshot.load_average),
        });
    }

    let memory_usage = snapshot.memory_used as f64 / snapshot.memory_total as f64;
    if memory_usage > thresholds.memory_usage_ratio {
        out.push(Alert {
            kind: AlertKind::Memory,
            text: format!("Memory usage too high: {:.0}%", memory_usage * 100.0),
        });
    }

    let free_disk_mib =
        snapshot.disk_total.saturating_sub(snapshot.disk_used) as f64 / BYTES_PER_MIB;
    if free_disk_mib < thresholds.min_free_disk_mib {
        out.push(Alert {
            kind: AlertKind::Disk,
            text: format!("Free disk space is too low: {free_disk_mib:.2} Mb left"),
        });
    }

    let net_usage = snapshot.net_usage as f64 / snapshot.net_capacity as f64;
    if net_usage > thresholds.network_usage_ratio {
        let available_mbit = snapshot.net_capacity.saturating_sub(snapshot.net_usage) as f64
            / BYTES_PER_SEC_PER_MBIT;
        out.push(Alert {
            kind: AlertKind::Network,
            text: format!("Network bandwidth usage high: {available_mbit:.2} Mbit/s available"),
        });
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const MIB: u64 = 1_048_576;

    fn healthy_snapshot() -> Snapshot {
        Snapshot {
            load_average: 0.5,
            memory_total: 1000,
            memory_used: 500,
            disk_total: 100 * MIB,
            disk_used: 50 * MIB,
            net_capacity: 1_000_000_000,
            net_usage: 100_000_000,
        }
    }

    #[test]
    fn healthy_snapshot_emits_nothing() {
        let alerts = evaluate(&healthy_snapshot(), &Thresholds::default());
        assert!(alerts.is_empty());
    }

    #[test]
    fn load_alert_is_boundary_exclusive() {
        let mut snapshot = healthy_snapshot();
        snapshot.load_average = 31.0;
        let alerts = evaluate(&snapshot, &Thresholds::default());
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].kind, AlertKind::Load);
        assert_eq!(alerts[0].text, "Load Average is too high: 31");

        snapshot.load_average = 30.0;
        assert!(evaluate(&snapshot, &Thresholds::default()).is_empty());
    }

    #[test]
    fn load_message_rounds_to_nearest_integer() {
        let mut snapshot = healthy_snapshot();
        snapshot.load_average = 30.4;
        let alerts = evaluate(&snapshot, &Thresholds::default());
        assert_eq!(alerts[0].text, "Load Average is too high: 30");

        snapshot.load_average = 41.6;
        let alerts = evaluate(&snapshot, &Thresholds::default());
        assert_eq!(alerts[0].text, "Load Average is too high: 42");
    }

    #[test]
    fn memory_alert_rounds_to_nearest_percent() {
        let mut snapshot = healthy_snapshot();
        snapshot.memory_used = 801;
        let alerts = evaluate(&snapshot, &Thresholds::default());
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].kind, AlertKind::Memory);
        assert_eq!(alerts[0].text, "Memory usage too high: 80%");

        snapshot.memory_used = 896;
        let alerts = evaluate(&snapshot, &Thresholds::default());
        assert_eq!(alerts[0].text, "Memory usage too high: 90%");

        snapshot.memory_used = 800;
        assert!(evaluate(&snapshot, &Thresholds::default()).is_empty());
    }

    #[test]
    fn disk_alert_reports_free_mib_with_two_decimals() {
        let mut snapshot = healthy_snapshot();
        snapshot.disk_total = 11 * MIB;
        snapshot.disk_used = 2 * MIB;
        let alerts = evaluate(&snapshot, &Thresholds::default());
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].kind, AlertKind::Disk);
        assert_eq!(alerts[0].text, "Free disk space is too low: 9.00 Mb left");

        snapshot.disk_used = MIB;
        assert!(evaluate(&snapshot, &Thresholds::default()).is_empty());
    }

    #[test]
    fn disk_alert_keeps_fractional_free_space() {
        let mut snapshot = healthy_snapshot();
        snapshot.disk_total = 11 * MIB;
        snapshot.disk_used = 2 * MIB + MIB / 2;
        let alerts = evaluate(&snapshot, &Thresholds::default());
        assert_eq!(alerts[0].text, "Free disk space is too low: 8.50 Mb left");
    }

    #[test]
    fn network_alert_is_boundary_exclusive() {
        let mut snapshot = healthy_snapshot();
        snapshot.net_usage = 950_000_000;
        let alerts = evaluate(&snapshot, &Thresholds::default());
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].kind, AlertKind::Network);
        assert_eq!(
            alerts[0].text,
            "Network bandwidth usage high: 400.00 Mbit/s available"
        );

        snapshot.net_usage = 900_000_000;
        assert!(evaluate(&snapshot, &Thresholds::default()).is_empty());
    }

    #[test]
    fn network_available_capacity_rounds_instead_of_truncating() {
        let mut snapshot = healthy_snapshot();
        snapshot.net_usage = 900_000_001;
        let alerts = evaluate(&snapshot, &Thresholds::default());
        assert_eq!(
            alerts[0].text,
            "Network bandwidth usage high: 800.00 Mbit/s available"
        );
    }

    #[test]
    fn alerts_follow_field_order() {
        let snapshot = Snapshot {
            load_average: 42.0,
            memory_total: 1000,
            memory_used: 901,
            disk_total: 11 * MIB,
            disk_used: 9 * MIB,
            net_capacity: 1_000_000_000,
            net_usage: 950_000_000,
        };
        let kinds: Vec<AlertKind> = evaluate(&snapshot, &Thresholds::default())
            .iter()
            .map(|a| a.kind)
            .collect();
        assert_eq!(
            kinds,
            vec![
                AlertKind::Load,
                AlertKind::Memory,
                AlertKind::Disk,
                AlertKind::Network
            ]
        );
    }

    #[test]
    fn usage_above_total_saturates() {
        let mut snapshot = healthy_snapshot();
        snapshot.memory_used = 1100;
        snapshot.disk_total = 9 * MIB;
        snapshot.disk_used = 10 * MIB;
        let alerts = evaluate(&snapshot, &Thresholds::default());
        assert_eq!(alerts.len(), 2);
        assert_eq!(alerts[0].text, "Memory usage too high: 110%");
        assert_eq!(alerts[1].text, "Free disk space is too low: 0.00 Mb left");
    }

    #[test]
    fn custom_thresholds_shift_the_boundaries() {
        let thresholds = Thresholds {
            load_average: 0.2,
            memory_usage_ratio: 0.4,
            min_free_disk_mib: 60.0,
            network_usage_ratio: 0.05,
        };
        let alerts = evaluate(&healthy_snapshot(), &thresholds);
        assert_eq!(alerts.len(), 4);
    }
}
