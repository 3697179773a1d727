use palette::Srgb;

pub const BUS_BLUE: Srgb<u8> = Srgb::new(0x25, 0x63, 0xeb);
pub const RAIL_PURPLE: Srgb<u8> = Srgb::new(0x7c, 0x3a, 0xed);
pub const TRIP_NAVY: Srgb<u8> = Srgb::new(0x0a, 0x2a, 0x66);
pub const ORIGIN_GREEN: Srgb<u8> = Srgb::new(0x16, 0xa3, 0x4a);
pub const DESTINATION_RED: Srgb<u8> = Srgb::new(0xdc, 0x26, 0x26);
pub const TRANSFER_AMBER: Srgb<u8> = Srgb::new(0xf5, 0x9e, 0x0b);
pub const NEUTRAL_GREY: Srgb<u8> = Srgb::new(0x6b, 0x72, 0x80);

/// `#rrggbb`, the form map engines take colours in
pub fn hex(color: Srgb<u8>) -> String {
    format!("#{color:x}")
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stroke {
    pub color: Srgb<u8>,
    /// Screen-space pixels
    pub weight: f32,
    pub opacity: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Fill {
    pub color: Srgb<u8>,
    pub opacity: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Style {
    pub stroke: Stroke,
    pub fill: Option<Fill>,
    /// Dash pattern in pixels (`[dash, gap]`)
    pub dash: Option<[f32; 2]>,
}

impl Style {
    pub fn line(color: Srgb<u8>, weight: f32, opacity: f32) -> Self {
        Self {
            stroke: Stroke {
                color,
                weight,
                opacity,
            },
            fill: None,
            dash: None,
        }
    }

    /// Solid circle marker: opaque outline, fill in the same colour.
    pub fn marker(color: Srgb<u8>, weight: f32, fill_opacity: f32) -> Self {
        Self::line(color, weight, 1.0).with_fill(color, fill_opacity)
    }

    pub fn with_fill(mut self, color: Srgb<u8>, opacity: f32) -> Self {
        self.fill = Some(Fill { color, opacity });
        self
    }

    pub fn with_dash(mut self, dash: f32, gap: f32) -> Self {
        self.dash = Some([dash, gap]);
        self
    }

    pub fn with_weight(mut self, weight: f32) -> Self {
        self.stroke.weight = weight;
        self
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.stroke.opacity = opacity;
        if let Some(fill) = self.fill.as_mut() {
            fill.opacity = fill.opacity.min(opacity);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex() {
        assert_eq!(hex(BUS_BLUE), "#2563eb");
        assert_eq!(hex(TRIP_NAVY), "#0a2a66");
    }

    #[test]
    fn test_marker_style() {
        let style = Style::marker(RAIL_PURPLE, 1.0, 0.9);
        assert_eq!(style.stroke.opacity, 1.0);
        assert_eq!(style.fill, Some(Fill { color: RAIL_PURPLE, opacity: 0.9 }));

        let dimmed = style.with_opacity(0.3);
        assert_eq!(dimmed.stroke.opacity, 0.3);
        assert_eq!(dimmed.fill.unwrap().opacity, 0.3);
    }
}
