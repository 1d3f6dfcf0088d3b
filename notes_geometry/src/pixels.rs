/// Reverses the row order of a tightly packed image.
///
/// OpenGL reads pixels back starting at the bottom row, image files start at the top.
pub fn flip_rows(pixels: &[u8], width: usize, height: usize, channels: usize) -> Vec<u8> {
    let row = width * channels;
    if row == 0 || height == 0 {
        return Vec::new();
    }

    let mut flipped = Vec::with_capacity(row * height);

    for line in pixels[..row * height].chunks_exact(row).rev() {
        flipped.extend_from_slice(line);
    }

    flipped
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn rows_are_reversed() {
        let pixels = [1, 1, 2, 2, 3, 3];

        assert_eq!(flip_rows(&pixels, 1, 3, 2), vec![3, 3, 2, 2, 1, 1]);
    }

    #[test]
    fn flipping_twice_restores_the_image() {
        let pixels: Vec<u8> = (0..48).collect();
        let once = flip_rows(&pixels, 4, 3, 4);

        assert_ne!(once, pixels);
        assert_eq!(flip_rows(&once, 4, 3, 4), pixels);
    }

    #[test]
    fn empty_images_flip_to_nothing() {
        assert!(flip_rows(&[], 0, 3, 4).is_empty());
        assert!(flip_rows(&[1, 2, 3], 3, 0, 1).is_empty());
    }
}
