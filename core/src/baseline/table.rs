use crate::baseline::stats::{BaselineStats, ChannelStats};
use crate::prelude::{Channel, SynthError, SynthResult};
use ndarray::{Array2, ArrayView1};

/// Captured (voltage, current) ADC readings used to learn the channel offsets.
pub const SAMPLE_TABLE: [[f64; 2]; 62] = [
    [0.151502, 2.274139],
    [0.060440, 2.179853],
    [0.003223, 2.076703],
    [0.003223, 2.000147],
    [0.000000, 1.927619],
    [0.024176, 1.856703],
    [0.278022, 1.803517],
    [0.473846, 1.763223],
    [0.639048, 1.710842],
    [0.739780, 1.714066],
    [0.826813, 1.718095],
    [0.846679, 1.723022],
    [0.832979, 1.732872],
    [1.442491, 2.260440],
    [1.575458, 2.359560],
    [1.668938, 2.421611],
    [1.706813, 2.449817],
    [1.776117, 2.519121],
    [1.535971, 2.587619],
    [1.330476, 2.658535],
    [1.164469, 2.721392],
    [1.000879, 2.767326],
    [0.930769, 2.800366],
    [1.036337, 2.798755],
    [1.098388, 2.787472],
    [1.149158, 2.779414],
    [1.135458, 2.747985],
    [1.096777, 2.724615],
    [1.061319, 2.791502],
    [1.122564, 2.793113],
    [1.153993, 2.776191],
    [1.135458, 2.737509],
    [1.095971, 2.706081],
    [1.061319, 2.664982],
    [1.010549, 2.626300],
    [0.887253, 2.556996],
    [0.462564, 1.762418],
    [0.636630, 1.724542],
    [0.775238, 1.710842],
    [1.142711, 2.786667],
    [1.161245, 2.770550],
    [1.142711, 2.740733],
    [1.086300, 2.690769],
    [1.052454, 2.672235],
    [0.990403, 2.617436],
    [0.857436, 2.527179],
    [0.746227, 2.449011],
    [0.618901, 2.374872],
    [0.489157, 2.284615],
    [0.357802, 2.190330],
    [0.236117, 2.093626],
    [0.142637, 2.021905],
    [0.081392, 1.967106],
    [0.038968, 1.928424],
    [0.019102, 1.899608],
    [0.009322, 1.876237],
    [0.004651, 1.860703],
    [0.002325, 1.847003],
    [0.001162, 1.838051],
    [0.000581, 1.830989],
    [0.000291, 1.826318],
    [0.000000, 1.822647],
];

/// Two-column sample table, voltage in column 0 and current in column 1.
#[derive(Debug, Clone)]
pub struct SampleTable {
    data: Array2<f64>,
}

impl SampleTable {
    pub fn embedded() -> Self {
        Self {
            data: Array2::from_shape_fn((SAMPLE_TABLE.len(), 2), |(row, col)| {
                SAMPLE_TABLE[row][col]
            }),
        }
    }

    pub fn from_rows(rows: &[[f64; 2]]) -> Self {
        Self {
            data: Array2::from_shape_fn((rows.len(), 2), |(row, col)| rows[row][col]),
        }
    }

    pub fn len(&self) -> usize {
        self.data.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.data.nrows() == 0
    }

    pub fn column(&self, channel: Channel) -> ArrayView1<'_, f64> {
        match channel {
            Channel::Voltage => self.data.column(0),
            Channel::Current => self.data.column(1),
        }
    }

    /// Mean and population standard deviation of both columns.
    pub fn stats(&self) -> SynthResult<BaselineStats> {
        Ok(BaselineStats {
            voltage: self.channel_stats(Channel::Voltage)?,
            current: self.channel_stats(Channel::Current)?,
        })
    }

    fn channel_stats(&self, channel: Channel) -> SynthResult<ChannelStats> {
        let column = self.column(channel);
        let mean = column.mean().ok_or(SynthError::EmptyTable)?;
        Ok(ChannelStats::new(mean, column.std(0.0)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_table_has_expected_shape() {
        let table = SampleTable::embedded();
        assert_eq!(table.len(), 62);
        assert_eq!(table.column(Channel::Voltage)[0], 0.151502);
        assert_eq!(table.column(Channel::Current)[61], 1.822647);
    }

    #[test]
    fn embedded_stats_match_reference_values() {
        let stats = SampleTable::embedded().stats().unwrap();
        assert!((stats.voltage.mean - 0.727_628_758).abs() < 1e-8);
        assert!((stats.voltage.std_dev - 0.525_720_866).abs() < 1e-8);
        assert!((stats.current.mean - 2.284_392_242).abs() < 1e-8);
        assert!((stats.current.std_dev - 0.405_761_745).abs() < 1e-8);
    }

    #[test]
    fn stats_match_slice_helper() {
        use crate::math::StatsHelper;

        let table = SampleTable::from_rows(&[[1.0, 10.0], [3.0, 14.0]]);
        let stats = table.stats().unwrap();
        assert_eq!(stats.voltage, ChannelStats::new(2.0, 1.0));
        assert_eq!(stats.current.mean, StatsHelper::mean(&[10.0, 14.0]));
        assert_eq!(stats.current.std_dev, StatsHelper::std_dev(&[10.0, 14.0]));
    }

    #[test]
    fn empty_table_is_rejected() {
        let table = SampleTable::from_rows(&[]);
        assert!(table.is_empty());
        assert!(matches!(table.stats(), Err(SynthError::EmptyTable)));
    }
}
