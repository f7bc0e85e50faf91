/// Braille frames cycled while a store request is pending.
///
pub const FRAMES: [&str; 8] = ["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"];

/// Frame for a spinner index, wrapping.
///
pub fn frame(index: usize) -> &'static str {
    FRAMES[index % FRAMES.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_wraps() {
        assert_eq!(frame(0), FRAMES[0]);
        assert_eq!(frame(FRAMES.len() + 1), FRAMES[1]);
    }
}
