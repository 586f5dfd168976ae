use image::Rgb;

/// Euclidean distance between two colors in RGB space
pub fn color_distance(a: &Rgb<u8>, b: &Rgb<u8>) -> f64 {
    let dr = a[0] as f64 - b[0] as f64;
    let dg = a[1] as f64 - b[1] as f64;
    let db = a[2] as f64 - b[2] as f64;
    (dr * dr + dg * dg + db * db).sqrt()
}

/// Returns true when `a` and `b` are further apart than `threshold`
pub fn exceeds_threshold(a: &Rgb<u8>, b: &Rgb<u8>, threshold: f64) -> bool {
    color_distance(a, b) > threshold
}
