//! Read-only device lookup shared by the timeline builder.

use log::warn;

/// Resolved entry for one device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceEntry<'a> {
    pub index: usize,
    pub isr_address: &'a str,
    pub service_delay: u64,
}

/// ISR addresses and service delays indexed by the same device number
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceTable {
    isr_addresses: Vec<String>,
    service_delays: Vec<u64>,
}

impl DeviceTable {
    /// Pair the vector table with the delay table
    ///
    /// Lengths may differ; only indices present in both are valid.
    pub fn new(isr_addresses: Vec<String>, service_delays: Vec<u64>) -> Self {
        if isr_addresses.len() != service_delays.len() {
            warn!(
                "Vector table has {} entries but device table has {}; only the first {} devices are usable",
                isr_addresses.len(),
                service_delays.len(),
                isr_addresses.len().min(service_delays.len())
            );
        }

        Self {
            isr_addresses,
            service_delays,
        }
    }

    /// Number of valid device indices
    pub fn len(&self) -> usize {
        self.isr_addresses.len().min(self.service_delays.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Look up a device, `None` when `index` is outside `[0, len)`
    pub fn lookup(&self, index: i64) -> Option<DeviceEntry<'_>> {
        let index = usize::try_from(index).ok()?;
        if index >= self.len() {
            return None;
        }

        Some(DeviceEntry {
            index,
            isr_address: &self.isr_addresses[index],
            service_delay: self.service_delays[index],
        })
    }

    pub fn isr_addresses(&self) -> &[String] {
        &self.isr_addresses
    }

    pub fn service_delays(&self) -> &[u64] {
        &self.service_delays
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> DeviceTable {
        DeviceTable::new(
            vec!["0x01E3".to_string(), "0x029C".to_string(), "0x0695".to_string()],
            vec![110, 150],
        )
    }

    #[test]
    fn test_len_is_shorter_table() {
        assert_eq!(table().len(), 2);
        assert!(!table().is_empty());
        assert!(DeviceTable::default().is_empty());
    }

    #[test]
    fn test_lookup_valid() {
        let table = table();
        let entry = table.lookup(1).unwrap();
        assert_eq!(entry.index, 1);
        assert_eq!(entry.isr_address, "0x029C");
        assert_eq!(entry.service_delay, 150);
    }

    #[test]
    fn test_lookup_out_of_range() {
        let table = table();
        assert!(table.lookup(-1).is_none());
        // Present in the vector table only
        assert!(table.lookup(2).is_none());
        assert!(table.lookup(i64::MAX).is_none());
    }
}
