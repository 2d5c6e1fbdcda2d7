fn main() {
    // Exposes build and git metadata to `metadata.rs` through `shadow!(build)`
    shadow_rs::ShadowBuilder::builder()
        .build()
        .expect("Failed to generate build metadata");
}
