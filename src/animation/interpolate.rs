use crate::animation::ease::Ease;

/// Map `frame` from the `input` window onto the `output` range.
///
/// Frames before `input[0]` hold `output[0]` and frames after `input[1]` hold `output[1]`; the
/// result never leaves the output range. A degenerate window (`input[1] <= input[0]`) resolves
/// straight to the end value.
pub fn interpolate(frame: f64, input: [f64; 2], output: [f64; 2], ease: Ease) -> f64 {
    let [in0, in1] = input;
    let [out0, out1] = output;
    let span = in1 - in0;
    if span.is_nan() || span <= 0.0 {
        return out1;
    }

    let t = if frame.is_nan() { 0.0 } else { (frame - in0) / span };
    let te = ease.apply(t);
    out0 + (out1 - out0) * te
}

#[cfg(test)]
#[path = "../../tests/unit/animation/interpolate.rs"]
mod tests;
