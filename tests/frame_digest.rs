use vitrine::{Animator, GalleryConfig, Manifest};

fn mix64(mut z: u64) -> u64 {
    // SplitMix64 mixing function.
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

fn digest_u64(bytes: &[u8]) -> u64 {
    let mut state = 0x9E37_79B9_7F4A_7C15u64;
    for chunk in bytes.chunks(8) {
        let mut v = 0u64;
        for (i, &b) in chunk.iter().enumerate() {
            v |= (b as u64) << (i * 8);
        }
        state = mix64(state ^ v);
    }
    state
}

fn sweep_digest(progress_offset: f32) -> u64 {
    let manifest = Manifest::from_files([
        "1_1_2025.glb",
        "2_1_2025.glb",
        "3_1_2025.glb",
        "4_1_2025.glb",
        "5_1_2025.glb",
    ]);
    let mut animator = Animator::new(GalleryConfig::default(), manifest);

    let mut digest = 0u64;
    for i in 0..=60u32 {
        let progress = (i as f32 / 60.0 + progress_offset).clamp(0.0, 1.0);
        let frame = animator.advance(progress, 1.0 / 60.0);
        let bytes = serde_json::to_vec(&frame).unwrap();
        digest ^= digest_u64(&bytes);
    }
    digest
}

#[test]
fn identical_sweeps_are_bit_identical() {
    assert_eq!(sweep_digest(0.0), sweep_digest(0.0));
}

#[test]
fn different_inputs_change_the_digest() {
    assert_ne!(sweep_digest(0.0), sweep_digest(0.01));
}
