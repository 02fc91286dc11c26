fn main() {
    #[cfg(target_arch = "wasm32")]
    freightdesk_frontend::boot();
}
