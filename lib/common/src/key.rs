use ordered_float::OrderedFloat;

/// Wrap every component of an array in [OrderedFloat].
///
/// Keys compare the way the floats do under `==`, so `-0.0` and `+0.0` share a key; NaN equals
/// itself and sorts above everything else.
#[inline]
pub fn float_key<const N: usize>(values: [f32; N]) -> [OrderedFloat<f32>; N] {
    values.map(OrderedFloat)
}
