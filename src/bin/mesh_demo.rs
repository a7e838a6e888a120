use shadow_demo::demo::MeshDemo;

fn main() {
    if let Err(err) = shadow_demo::run::<MeshDemo>() {
        eprintln!("Application error: {err}");
        std::process::exit(1);
    }
}
