use crate::error::GeometryError;

/// Number of work groups to dispatch on each axis so that `extent` invocations are covered by
/// groups of `local_size`. Partial groups are rounded up; the shader is expected to discard
/// invocations that fall outside the extent.
pub fn dispatch_groups(extent: [u32; 3], local_size: [u32; 3]) -> Result<[u32; 3], GeometryError> {
    if local_size.iter().any(|&s| s == 0) {
        return Err(GeometryError::ZeroWorkGroup(local_size));
    }

    let mut groups = [0; 3];
    for axis in 0..3 {
        groups[axis] = (extent[axis] + local_size[axis] - 1) / local_size[axis];
    }

    Ok(groups)
}

/// Total invocations in one work group.
pub fn invocations(local_size: [u32; 3]) -> u32 {
    local_size.iter().product()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn exact_multiples_are_not_padded() {
        assert_eq!(dispatch_groups([1024, 768, 1], [16, 16, 1]).unwrap(), [64, 48, 1]);
    }

    #[test]
    fn partial_groups_are_rounded_up() {
        assert_eq!(dispatch_groups([1000, 700, 1], [32, 32, 1]).unwrap(), [32, 22, 1]);
    }

    #[test]
    fn zero_local_size_is_rejected() {
        assert!(dispatch_groups([64, 64, 1], [8, 0, 1]).is_err());
    }

    #[test]
    fn invocations_multiply_every_axis() {
        assert_eq!(invocations([16, 16, 1]), 256);
    }
}
