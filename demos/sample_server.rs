use clopts::{CommandLineOptions, Declaration};

fn main() {
    let resolver = CommandLineOptions::new()
        .add(
            "root",
            Declaration::new(".")
                .entry(1)
                .description("The directory to serve."),
        )
        .add("port", Declaration::new(3000).description("The port to listen on."))
        .add(
            "host",
            Declaration::new("localhost").description("The host to bind."),
        )
        .add("headers", Declaration::new([("cache", "none")]).description("The extra response headers."))
        .add("verbose", "Log every request.")
        .version(env!("CARGO_PKG_VERSION"))
        .build()
        .config_files(&["demos/sample_server.config.json"]);

    for (name, value) in resolver.get_all(true) {
        println!("{name}: {value}");
    }
}
