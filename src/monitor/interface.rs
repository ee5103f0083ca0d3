use std::thread;
use std::time::Duration;

use crossbeam::channel::Sender;
use netdev::interface::InterfaceType;

use crate::model::{InterfaceInfo, InterfaceKind, PathUpdate};

/// How often the watcher re-enumerates interfaces looking for changes.
const WATCH_INTERVAL: Duration = Duration::from_secs(3);

/// Picks the interface to sample: the first wifi or wired entry in list
/// order, else the first entry of any kind.
pub fn select_active(interfaces: &[InterfaceInfo]) -> Option<&InterfaceInfo> {
    interfaces
        .iter()
        .find(|info| matches!(info.kind, InterfaceKind::Wifi | InterfaceKind::Wired))
        .or_else(|| interfaces.first())
}

fn kind_of(if_type: InterfaceType) -> InterfaceKind {
    match if_type {
        InterfaceType::Wireless80211 => InterfaceKind::Wifi,
        InterfaceType::Ethernet
        | InterfaceType::Ethernet3Megabit
        | InterfaceType::FastEthernetT
        | InterfaceType::FastEthernetFx
        | InterfaceType::GigabitEthernet => InterfaceKind::Wired,
        _ => InterfaceKind::Other,
    }
}

fn usable_interfaces() -> Vec<InterfaceInfo> {
    netdev::get_interfaces()
        .into_iter()
        .filter(|iface| iface.is_up() && !iface.is_loopback())
        .map(|iface| InterfaceInfo {
            name: iface.name,
            kind: kind_of(iface.if_type),
        })
        .collect()
}

/// Watches the interface table on its own thread. Sends one initial update
/// and another whenever the usable set changes, then exits once the
/// receiving side goes away.
pub fn spawn_path_watcher(tx: Sender<PathUpdate>) {
    thread::spawn(move || {
        let mut last: Option<Vec<InterfaceInfo>> = None;
        loop {
            let interfaces = usable_interfaces();
            if last.as_deref() != Some(interfaces.as_slice()) {
                let update = PathUpdate {
                    interfaces: interfaces.clone(),
                };
                if tx.send(update).is_err() {
                    return;
                }
                last = Some(interfaces);
            }
            thread::sleep(WATCH_INTERVAL);
        }
    });
}
