//! Stereo biquad filter (RBJ cookbook coefficients)

use std::f32::consts::PI;

/// Gains below this are treated as flat (identity coefficients)
const FLAT_GAIN_DB: f32 = 0.01;

#[derive(Debug, Clone, Copy)]
struct Coefficients {
    b0: f32,
    b1: f32,
    b2: f32,
    a1: f32,
    a2: f32,
}

impl Coefficients {
    const FLAT: Self = Self {
        b0: 1.0,
        b1: 0.0,
        b2: 0.0,
        a1: 0.0,
        a2: 0.0,
    };
}

/// Direct form I history for one channel
#[derive(Debug, Clone, Copy, Default)]
struct ChannelState {
    x1: f32,
    x2: f32,
    y1: f32,
    y2: f32,
}

impl ChannelState {
    #[inline]
    fn run(&mut self, c: &Coefficients, input: f32) -> f32 {
        let mut output =
            c.b0 * input + c.b1 * self.x1 + c.b2 * self.x2 - c.a1 * self.y1 - c.a2 * self.y2;
        // Flush denormals
        if output.abs() < 1e-15 {
            output = 0.0;
        }
        self.x2 = self.x1;
        self.x1 = input;
        self.y2 = self.y1;
        self.y1 = output;
        output
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Biquad {
    coefficients: Coefficients,
    left: ChannelState,
    right: ChannelState,
}

impl Biquad {
    /// Pass-through filter
    pub(crate) fn identity() -> Self {
        Self {
            coefficients: Coefficients::FLAT,
            left: ChannelState::default(),
            right: ChannelState::default(),
        }
    }

    /// Configure as peaking EQ filter
    pub(crate) fn set_peaking(&mut self, sample_rate: f32, frequency: f32, q: f32, gain_db: f32) {
        if sample_rate < 1.0 {
            return;
        }
        if gain_db.abs() < FLAT_GAIN_DB {
            self.set_flat();
            return;
        }

        let a = 10.0_f32.powf(gain_db / 40.0);
        let omega = 2.0 * PI * nyquist_safe(frequency, sample_rate) / sample_rate;
        let sin_omega = omega.sin();
        let cos_omega = omega.cos();
        let alpha = sin_omega / (2.0 * q);

        let b0 = 1.0 + alpha * a;
        let b1 = -2.0 * cos_omega;
        let b2 = 1.0 - alpha * a;
        let a0 = 1.0 + alpha / a;
        let a1 = -2.0 * cos_omega;
        let a2 = 1.0 - alpha / a;

        self.set_normalized(a0, b0, b1, b2, a1, a2);
    }

    /// Configure as low shelf filter
    pub(crate) fn set_low_shelf(&mut self, sample_rate: f32, frequency: f32, q: f32, gain_db: f32) {
        if sample_rate < 1.0 {
            return;
        }
        if gain_db.abs() < FLAT_GAIN_DB {
            self.set_flat();
            return;
        }

        let a = 10.0_f32.powf(gain_db / 40.0);
        let omega = 2.0 * PI * nyquist_safe(frequency, sample_rate) / sample_rate;
        let sin_omega = omega.sin();
        let cos_omega = omega.cos();
        let alpha = sin_omega / 2.0 * ((a + 1.0 / a) * (1.0 / q - 1.0) + 2.0).sqrt();
        let beta = 2.0 * a.sqrt() * alpha;

        let b0 = a * ((a + 1.0) - (a - 1.0) * cos_omega + beta);
        let b1 = 2.0 * a * ((a - 1.0) - (a + 1.0) * cos_omega);
        let b2 = a * ((a + 1.0) - (a - 1.0) * cos_omega - beta);
        let a0 = (a + 1.0) + (a - 1.0) * cos_omega + beta;
        let a1 = -2.0 * ((a - 1.0) + (a + 1.0) * cos_omega);
        let a2 = (a + 1.0) + (a - 1.0) * cos_omega - beta;

        self.set_normalized(a0, b0, b1, b2, a1, a2);
    }

    fn set_flat(&mut self) {
        self.coefficients = Coefficients::FLAT;
    }

    fn set_normalized(&mut self, a0: f32, b0: f32, b1: f32, b2: f32, a1: f32, a2: f32) {
        self.coefficients = Coefficients {
            b0: b0 / a0,
            b1: b1 / a0,
            b2: b2 / a0,
            a1: a1 / a0,
            a2: a2 / a0,
        };
    }

    #[inline]
    pub(crate) fn process(&mut self, left: f32, right: f32) -> (f32, f32) {
        (
            self.left.run(&self.coefficients, left),
            self.right.run(&self.coefficients, right),
        )
    }

    pub(crate) fn reset(&mut self) {
        self.left = ChannelState::default();
        self.right = ChannelState::default();
    }
}

/// Keep the center frequency below 45% of the sample rate
fn nyquist_safe(frequency: f32, sample_rate: f32) -> f32 {
    frequency.min(sample_rate * 0.45)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Steady-state RMS gain of a sine through the filter
    fn sine_gain(filter: &mut Biquad, freq: f32, sample_rate: f32) -> f32 {
        let samples = (sample_rate * 0.5) as usize;
        let mut energy_in = 0.0_f32;
        let mut energy_out = 0.0_f32;
        for i in 0..samples {
            let x = (2.0 * PI * freq * i as f32 / sample_rate).sin() * 0.25;
            let (y, _) = filter.process(x, x);
            // skip the transient
            if i > samples / 2 {
                energy_in += x * x;
                energy_out += y * y;
            }
        }
        (energy_out / energy_in).sqrt()
    }

    #[test]
    fn flat_gain_is_identity() {
        let mut filter = Biquad::identity();
        filter.set_peaking(48_000.0, 1000.0, 1.0, 0.0);
        assert_eq!(filter.process(0.3, -0.7), (0.3, -0.7));
    }

    #[test]
    fn peaking_boosts_center_frequency() {
        let mut filter = Biquad::identity();
        filter.set_peaking(48_000.0, 1000.0, 1.0, 6.0);
        let gain = sine_gain(&mut filter, 1000.0, 48_000.0);
        assert!((gain - 2.0).abs() < 0.1, "expected ~+6 dB, got {}", gain);
    }

    #[test]
    fn low_shelf_leaves_highs_alone() {
        let mut filter = Biquad::identity();
        filter.set_low_shelf(48_000.0, 80.0, 0.707, 12.0);
        let high = sine_gain(&mut filter, 8000.0, 48_000.0);
        assert!((high - 1.0).abs() < 0.05, "high band moved: {}", high);
    }

    #[test]
    fn channels_keep_independent_history() {
        let mut stereo = Biquad::identity();
        stereo.set_peaking(48_000.0, 500.0, 1.0, 9.0);
        let mut mono = stereo.clone();

        // feed the right channel silence; it must not see the left's history
        let inputs = [0.8, -0.3, 0.6, 0.1, -0.9];
        for x in inputs {
            let (l, r) = stereo.process(x, 0.0);
            let (expected, _) = mono.process(x, x);
            assert_eq!(l, expected);
            assert_eq!(r, 0.0);
        }
    }

    #[test]
    fn reset_clears_history() {
        let mut used = Biquad::identity();
        used.set_peaking(44_100.0, 230.0, 1.0, -6.0);
        used.process(1.0, 1.0);
        used.process(-0.5, 0.25);
        used.reset();

        let mut fresh = Biquad::identity();
        fresh.set_peaking(44_100.0, 230.0, 1.0, -6.0);

        for x in [0.5, -0.2, 0.9] {
            assert_eq!(used.process(x, x), fresh.process(x, x));
        }
    }
}
