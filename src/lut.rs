use eframe::egui::Color32;

// ---------------------------------------------------------------------------
// Lookup tables: 8-bit index → Color32
// ---------------------------------------------------------------------------

/// A 256-entry colour table applied to 8-bit scaled intensities.
#[derive(Debug, Clone, PartialEq)]
pub struct Lut {
    pub name: &'static str,
    table: [Color32; 256],
}

impl Lut {
    /// Identity gray ramp.
    pub fn grays() -> Self {
        Self::from_fn("Grays", Color32::from_gray)
    }

    /// The "3-3-2 RGB" table: bits `rrrgggbb` of the index select the colour.
    pub fn rgb332() -> Self {
        Self::from_fn("3-3-2 RGB", |i| {
            Color32::from_rgb(i & 0xe0, (i << 3) & 0xe0, (i << 6) & 0xc0)
        })
    }

    fn from_fn(name: &'static str, f: impl Fn(u8) -> Color32) -> Self {
        let mut table = [Color32::BLACK; 256];
        for (i, slot) in table.iter_mut().enumerate() {
            *slot = f(i as u8);
        }
        Lut { name, table }
    }

    /// Look up the colour for an 8-bit index.
    pub fn color_for(&self, index: u8) -> Color32 {
        self.table[index as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grays_is_identity() {
        let lut = Lut::grays();
        assert_eq!(lut.color_for(0), Color32::BLACK);
        assert_eq!(lut.color_for(255), Color32::from_gray(255));
        assert_eq!(lut.color_for(17), Color32::from_rgb(17, 17, 17));
    }

    #[test]
    fn rgb332_splits_bits() {
        let lut = Lut::rgb332();
        assert_eq!(lut.color_for(0b1110_0000), Color32::from_rgb(0xe0, 0, 0));
        assert_eq!(lut.color_for(0b0001_1100), Color32::from_rgb(0, 0xe0, 0));
        assert_eq!(lut.color_for(0b0000_0011), Color32::from_rgb(0, 0, 0xc0));
        assert_eq!(lut.color_for(0xff), Color32::from_rgb(0xe0, 0xe0, 0xc0));
    }
}
