use shadow_demo::demo::ShadowDemo;

fn main() {
    if let Err(err) = shadow_demo::run::<ShadowDemo>() {
        eprintln!("Application error: {err}");
        std::process::exit(1);
    }
}
