/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform value in `[low, high)`.
    fn uniform(&mut self, low: f64, high: f64) -> f64 {
        low + (high - low) * self.next_f64()
    }
}

/// Walk an open traverse: each leg turns a little from the previous
/// bearing and runs 40–120 units.
fn walk_traverse(rng: &mut SimpleRng, start: (f64, f64), legs: usize) -> Vec<(f64, f64)> {
    let mut stations = vec![start];
    let (mut easting, mut northing) = start;
    let mut bearing_deg: f64 = 60.0;

    for _ in 0..legs {
        bearing_deg = (bearing_deg + rng.uniform(-50.0, 50.0)).rem_euclid(360.0);
        let length = rng.uniform(40.0, 120.0);
        let rad = bearing_deg.to_radians();
        // Bearings are clockwise from north: easting takes the sine.
        easting += length * rad.sin();
        northing += length * rad.cos();
        stations.push((easting, northing));
    }
    stations
}

fn main() {
    let mut rng = SimpleRng::new(42);
    let stations = walk_traverse(&mut rng, (1000.0, 5000.0), 11);

    let output_path = "traverse_data.csv";
    let mut writer = csv::Writer::from_path(output_path).expect("Failed to create output file");
    writer
        .write_record(["Point", "Easting", "Northing"])
        .expect("Failed to write header");

    for (i, (easting, northing)) in stations.iter().enumerate() {
        writer
            .write_record([
                (i + 1).to_string(),
                format!("{easting:.3}"),
                format!("{northing:.3}"),
            ])
            .expect("Failed to write row");
    }

    // One row the reader is expected to skip and report.
    writer
        .write_record(["99", "not-a-number", "5000.000"])
        .expect("Failed to write row");
    writer.flush().expect("Failed to flush output");

    println!(
        "Wrote {} stations (plus 1 malformed row) to {output_path}",
        stations.len()
    );
}
