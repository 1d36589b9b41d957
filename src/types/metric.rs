//! Defines the `Metric` enum: the fixed set of chartable variables extracted from
//! normalized rows, with their display metadata and aggregation category.

/// Physical quantity family a metric belongs to.
///
/// The category decides how a metric is reduced when chart points are grouped:
/// precipitation is summed, everything else is averaged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricCategory {
    Temperature,
    Precipitation,
    Wind,
    Humidity,
    Pressure,
    Radiation,
}

/// A chartable variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Metric {
    TempMax,
    TempMin,
    TempInst,
    DewPoint,
    Rain,
    HumidityMax,
    HumidityMin,
    HumidityInst,
    WindSpeed,
    WindGust,
    PressureMax,
    PressureMin,
    Radiation,
}

impl Metric {
    /// All metrics, in display order.
    pub const ALL: [Metric; 13] = [
        Metric::TempMax,
        Metric::TempMin,
        Metric::TempInst,
        Metric::DewPoint,
        Metric::Rain,
        Metric::HumidityMax,
        Metric::HumidityMin,
        Metric::HumidityInst,
        Metric::WindSpeed,
        Metric::WindGust,
        Metric::PressureMax,
        Metric::PressureMin,
        Metric::Radiation,
    ];

    pub const COUNT: usize = Self::ALL.len();

    /// Position of this metric in [`Metric::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// Key used in serialized chart points, e.g. `"tempMax"`.
    pub fn key(self) -> &'static str {
        match self {
            Metric::TempMax => "tempMax",
            Metric::TempMin => "tempMin",
            Metric::TempInst => "tempInst",
            Metric::DewPoint => "dewPoint",
            Metric::Rain => "rain",
            Metric::HumidityMax => "humidityMax",
            Metric::HumidityMin => "humidityMin",
            Metric::HumidityInst => "humidityInst",
            Metric::WindSpeed => "windSpeed",
            Metric::WindGust => "windGust",
            Metric::PressureMax => "pressureMax",
            Metric::PressureMin => "pressureMin",
            Metric::Radiation => "radiation",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Metric::TempMax => "Temperatura Máxima",
            Metric::TempMin => "Temperatura Mínima",
            Metric::TempInst => "Temperatura Instantânea",
            Metric::DewPoint => "Ponto de Orvalho",
            Metric::Rain => "Precipitação",
            Metric::HumidityMax => "Umidade Máxima",
            Metric::HumidityMin => "Umidade Mínima",
            Metric::HumidityInst => "Umidade Instantânea",
            Metric::WindSpeed => "Velocidade do Vento",
            Metric::WindGust => "Rajada de Vento",
            Metric::PressureMax => "Pressão Máxima",
            Metric::PressureMin => "Pressão Mínima",
            Metric::Radiation => "Radiação Global",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            Metric::TempMax | Metric::TempMin | Metric::TempInst | Metric::DewPoint => "°C",
            Metric::Rain => "mm",
            Metric::HumidityMax | Metric::HumidityMin | Metric::HumidityInst => "%",
            Metric::WindSpeed | Metric::WindGust => "m/s",
            Metric::PressureMax | Metric::PressureMin => "hPa",
            Metric::Radiation => "kJ/m²",
        }
    }

    pub fn category(self) -> MetricCategory {
        match self {
            Metric::TempMax | Metric::TempMin | Metric::TempInst | Metric::DewPoint => {
                MetricCategory::Temperature
            }
            Metric::Rain => MetricCategory::Precipitation,
            Metric::HumidityMax | Metric::HumidityMin | Metric::HumidityInst => {
                MetricCategory::Humidity
            }
            Metric::WindSpeed | Metric::WindGust => MetricCategory::Wind,
            Metric::PressureMax | Metric::PressureMin => MetricCategory::Pressure,
            Metric::Radiation => MetricCategory::Radiation,
        }
    }

    /// Row category the metric is read from.
    pub fn source_category(self) -> &'static str {
        match self {
            Metric::TempMax | Metric::TempMin | Metric::TempInst => "Temperatura",
            Metric::DewPoint => "Ponto de Orvalho",
            Metric::Rain => "Chuva",
            Metric::HumidityMax | Metric::HumidityMin | Metric::HumidityInst => "Umidade",
            Metric::WindSpeed | Metric::WindGust => "Vento",
            Metric::PressureMax | Metric::PressureMin => "Pressão",
            Metric::Radiation => "Radiação",
        }
    }

    /// Sub-label spellings to try, in order. Automatic and manual stations spell
    /// their sub-labels differently, so the first one present wins.
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            Metric::TempMax | Metric::HumidityMax | Metric::PressureMax => &["Max.", "Max"],
            Metric::TempMin | Metric::HumidityMin | Metric::PressureMin => &["Min.", "Min"],
            Metric::TempInst | Metric::HumidityInst => &["Inst.", "Med.", "Med"],
            Metric::DewPoint => &["Inst.", "Med."],
            Metric::Rain => &["(mm)", "mm"],
            Metric::WindSpeed => &["Vel. (m/s)", "Vel.", "Vel"],
            Metric::WindGust => &["Raj. (m/s)", "Raj.", "Raj"],
            Metric::Radiation => &["Kj/m²", "kJ/m²"],
        }
    }

    /// Looks a metric up by its serialized key.
    pub fn from_key(key: &str) -> Option<Metric> {
        Metric::ALL.into_iter().find(|m| m.key() == key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_matches_position_in_all() {
        for (i, metric) in Metric::ALL.iter().enumerate() {
            assert_eq!(metric.index(), i);
            assert_eq!(Metric::from_key(metric.key()), Some(*metric));
        }
    }

    #[test]
    fn test_only_rain_is_precipitation() {
        let summed: Vec<_> = Metric::ALL
            .into_iter()
            .filter(|m| m.category() == MetricCategory::Precipitation)
            .collect();
        assert_eq!(summed, vec![Metric::Rain]);
    }
}
