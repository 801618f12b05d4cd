// Domain profiles - field maps driving the shared normalize/aggregate pipeline

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Domain {
    Traffic,
    Weather,
    Air,
}

impl Domain {
    pub fn as_str(&self) -> &'static str {
        match self {
            Domain::Traffic => "traffic",
            Domain::Weather => "weather",
            Domain::Air => "air",
        }
    }

    /// Profile for the `/api/analytics/{domain}/hourly` series.
    pub fn profile(&self) -> &'static DomainProfile {
        match self {
            Domain::Traffic => &TRAFFIC,
            Domain::Weather => &WEATHER,
            Domain::Air => &AIR,
        }
    }

    /// Profile for the flat `/api/{domain}/hourly` rows used by the
    /// overview tables. Identical to the analytics profile except that the
    /// flat weather rows carry a `city` label.
    pub fn flat_profile(&self) -> &'static DomainProfile {
        match self {
            Domain::Weather => &WEATHER_FLAT,
            other => other.profile(),
        }
    }
}

/// One canonical metric and the raw field name(s) it is read from. The
/// fallback is consulted only when the primary is absent or non-numeric.
#[derive(Debug, Clone, Copy)]
pub struct MetricField {
    pub name: &'static str,
    pub primary: &'static str,
    pub fallback: Option<&'static str>,
}

#[derive(Debug, Clone, Copy)]
pub struct DomainProfile {
    pub domain: Domain,
    pub timestamp_field: &'static str,
    pub label_field: Option<&'static str>,
    pub metrics: &'static [MetricField],
}

pub const TRAFFIC: DomainProfile = DomainProfile {
    domain: Domain::Traffic,
    timestamp_field: "hour_start",
    label_field: Some("location"),
    metrics: &[
        MetricField {
            name: "avg_speed",
            primary: "avg_speed",
            fallback: None,
        },
        MetricField {
            name: "free_flow_avg",
            primary: "free_flow_avg",
            fallback: None,
        },
    ],
};

pub const WEATHER: DomainProfile = DomainProfile {
    domain: Domain::Weather,
    timestamp_field: "hour_start",
    label_field: None,
    metrics: &[
        // Older rows report avg_temperature instead of avg_temp.
        MetricField {
            name: "avg_temp",
            primary: "avg_temp",
            fallback: Some("avg_temperature"),
        },
        MetricField {
            name: "avg_humidity",
            primary: "avg_humidity",
            fallback: None,
        },
        MetricField {
            name: "avg_wind_speed",
            primary: "avg_wind_speed",
            fallback: None,
        },
    ],
};

const WEATHER_FLAT: DomainProfile = DomainProfile {
    label_field: Some("city"),
    ..WEATHER
};

pub const AIR: DomainProfile = DomainProfile {
    domain: Domain::Air,
    timestamp_field: "hour_start",
    label_field: Some("city"),
    metrics: &[
        MetricField {
            name: "avg_aqi",
            primary: "avg_aqi",
            fallback: None,
        },
        MetricField {
            name: "avg_pm25",
            primary: "avg_pm25",
            fallback: None,
        },
    ],
};
