// AQI category bands (CPCB scale)

/// Display category for an AQI reading. Colors are theme tokens the
/// frontend maps to its palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AqiCategory {
    pub label: &'static str,
    pub color: &'static str,
}

/// Band edges are inclusive on the upper side: 50 is still Good, 51 is
/// Satisfactory.
pub fn aqi_category(aqi: Option<f64>) -> AqiCategory {
    let Some(aqi) = aqi else {
        return AqiCategory {
            label: "No Data",
            color: "gray",
        };
    };

    if aqi <= 50.0 {
        AqiCategory {
            label: "Good",
            color: "green",
        }
    } else if aqi <= 100.0 {
        AqiCategory {
            label: "Satisfactory",
            color: "yellow",
        }
    } else if aqi <= 200.0 {
        AqiCategory {
            label: "Moderate",
            color: "orange",
        }
    } else if aqi <= 300.0 {
        AqiCategory {
            label: "Poor",
            color: "red",
        }
    } else if aqi <= 400.0 {
        AqiCategory {
            label: "Very Poor",
            color: "purple",
        }
    } else {
        AqiCategory {
            label: "Severe",
            color: "rose",
        }
    }
}
