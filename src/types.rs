cfg_if::cfg_if! {
    if #[cfg(feature = "f32")] {
        pub type Float = f32;
    } else {
        pub type Float = f64;
    }
}
