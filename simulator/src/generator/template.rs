use rand::Rng;

/// Vendor prefixes commonly seen on consumer access points.
const OUI_PREFIXES: [[u8; 3]; 6] = [
    [0x00, 0x1A, 0x2B],
    [0x3C, 0x84, 0x6A],
    [0x50, 0xC7, 0xBF],
    [0x74, 0xDA, 0x38],
    [0xA4, 0x2B, 0xB0],
    [0xF0, 0x9F, 0xC2],
];

const SSID_STEMS: [&str; 8] = [
    "CafeNet",
    "Office-5G",
    "TP-Link",
    "Guest",
    "HomeRouter",
    "Printer-Direct",
    "IoT-Hub",
    "Lab",
];

/// Hardware address unique per `index` within one sweep.
pub fn mac_address<R: Rng>(rng: &mut R, index: u16) -> String {
    let oui = OUI_PREFIXES[rng.gen_range(0..OUI_PREFIXES.len())];
    let [hi, lo] = index.to_be_bytes();
    format!(
        "{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}",
        oui[0],
        oui[1],
        oui[2],
        rng.gen::<u8>(),
        hi,
        lo
    )
}

pub fn ssid<R: Rng>(rng: &mut R) -> String {
    let stem = SSID_STEMS[rng.gen_range(0..SSID_STEMS.len())];
    format!("{}_{:02X}", stem, rng.gen::<u8>())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn mac_addresses_encode_index() {
        let mut rng = StdRng::seed_from_u64(7);
        let mac = mac_address(&mut rng, 0x0102);
        assert_eq!(mac.len(), 17);
        assert!(mac.ends_with(":01:02"));
    }

    #[test]
    fn ssid_uses_known_stem() {
        let mut rng = StdRng::seed_from_u64(7);
        let name = ssid(&mut rng);
        assert!(SSID_STEMS.iter().any(|stem| name.starts_with(stem)));
    }
}
