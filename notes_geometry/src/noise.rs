//! 2D gradient noise and the height maps built from it.

const PERMUTATION: [u8; 256] = [
    151, 160, 137, 91, 90, 15, 131, 13, 201, 95, 96, 53, 194, 233, 7, 225, 140, 36, 103, 30, 69,
    142, 8, 99, 37, 240, 21, 10, 23, 190, 6, 148, 247, 120, 234, 75, 0, 26, 197, 62, 94, 252,
    219, 203, 117, 35, 11, 32, 57, 177, 33, 88, 237, 149, 56, 87, 174, 20, 125, 136, 171, 168,
    68, 175, 74, 165, 71, 134, 139, 48, 27, 166, 77, 146, 158, 231, 83, 111, 229, 122, 60, 211,
    133, 230, 220, 105, 92, 41, 55, 46, 245, 40, 244, 102, 143, 54, 65, 25, 63, 161, 1, 216, 80,
    73, 209, 76, 132, 187, 208, 89, 18, 169, 200, 196, 135, 130, 116, 188, 159, 86, 164, 100,
    109, 198, 173, 186, 3, 64, 52, 217, 226, 250, 124, 123, 5, 202, 38, 147, 118, 126, 255, 82,
    85, 212, 207, 206, 59, 227, 47, 16, 58, 17, 182, 189, 28, 42, 223, 183, 170, 213, 119, 248,
    152, 2, 44, 154, 163, 70, 221, 153, 101, 155, 167, 43, 172, 9, 129, 22, 39, 253, 19, 98, 108,
    110, 79, 113, 224, 232, 178, 185, 112, 104, 218, 246, 97, 228, 251, 34, 242, 193, 238, 210,
    144, 12, 191, 179, 162, 241, 81, 51, 145, 235, 249, 14, 239, 107, 49, 192, 214, 31, 181, 199,
    106, 157, 184, 84, 204, 176, 115, 121, 50, 45, 127, 4, 150, 254, 138, 236, 205, 93, 222, 114,
    67, 29, 24, 72, 243, 141, 128, 195, 78, 66, 215, 61, 156, 180,
];

fn hash(i: i32) -> usize {
    PERMUTATION[(i & 255) as usize] as usize
}

fn fade(t: f32) -> f32 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

fn lerp(t: f32, a: f32, b: f32) -> f32 {
    a + t * (b - a)
}

// One of eight unit-ish gradient directions, picked by the low bits of the hash
fn gradient(hash: usize, x: f32, y: f32) -> f32 {
    match hash & 7 {
        0 => x + y,
        1 => -x + y,
        2 => x - y,
        3 => -x - y,
        4 => x,
        5 => -x,
        6 => y,
        _ => -y,
    }
}

/// Classic gradient noise. Zero on every integer lattice point and roughly within `[-1, 1]`.
pub fn perlin(x: f32, y: f32) -> f32 {
    let xi = x.floor() as i32;
    let yi = y.floor() as i32;
    let xf = x - x.floor();
    let yf = y - y.floor();

    let u = fade(xf);
    let v = fade(yf);

    let aa = hash(hash(xi) as i32 + yi);
    let ab = hash(hash(xi) as i32 + yi + 1);
    let ba = hash(hash(xi + 1) as i32 + yi);
    let bb = hash(hash(xi + 1) as i32 + yi + 1);

    lerp(
        v,
        lerp(u, gradient(aa, xf, yf), gradient(ba, xf - 1.0, yf)),
        lerp(u, gradient(ab, xf, yf - 1.0), gradient(bb, xf - 1.0, yf - 1.0)),
    )
}

/// Builds a single-channel height map, one byte per texel, stored row by row (`x + width * y`).
///
/// The texel at `(x, y)` samples the noise at `(x, y) / (size - 1) * frequency`, divides it by
/// `scale` and remaps it from `[-1, 1]` to `[0, 255]`.
pub fn height_map(width: u32, height: u32, frequency: f32, scale: f32) -> Vec<u8> {
    let x_factor = 1.0 / (width.max(2) - 1) as f32;
    let y_factor = 1.0 / (height.max(2) - 1) as f32;

    let mut map = vec![0u8; (width * height) as usize];
    for y in 0..height {
        for x in 0..width {
            let value = perlin(
                x as f32 * x_factor * frequency,
                y as f32 * y_factor * frequency,
            ) / scale;
            let result = ((value + 1.0) / 2.0).max(0.0).min(1.0);
            map[(x + width * y) as usize] = (result * 255.0) as u8;
        }
    }

    map
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn noise_vanishes_on_lattice_points() {
        for x in -3..4 {
            for y in -3..4 {
                assert_eq!(perlin(x as f32, y as f32), 0.0);
            }
        }
    }

    #[test]
    fn noise_stays_bounded() {
        for i in 0..200 {
            for j in 0..200 {
                let n = perlin(i as f32 * 0.037, j as f32 * 0.053);
                assert!(n.abs() <= 1.0 + 1e-5, "perlin out of range: {}", n);
            }
        }
    }

    #[test]
    fn noise_is_deterministic_and_varies() {
        assert_eq!(perlin(1.3, 2.7), perlin(1.3, 2.7));

        let samples: Vec<f32> = (0..16).map(|i| perlin(i as f32 * 0.61 + 0.2, 0.35)).collect();
        assert!(samples.iter().any(|&s| s != samples[0]));
    }

    #[test]
    fn height_map_covers_every_texel() {
        let map = height_map(64, 32, 6.0, 1.5);

        assert_eq!(map.len(), 64 * 32);
    }

    #[test]
    fn height_map_is_mid_grey_on_lattice_points() {
        // With frequency == size - 1 every texel lands on a lattice point
        let map = height_map(8, 8, 7.0, 1.5);

        assert!(map.iter().all(|&h| h == 127));
    }
}
