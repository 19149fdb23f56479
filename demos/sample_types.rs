use clopts::{CommandLineOptions, Declaration, Tiers};

fn main() {
    let resolver = CommandLineOptions::new()
        .add("string", Declaration::new("text").description("A string."))
        .add("number", Declaration::new(1.5).description("A number."))
        .add("boolean", "A boolean switch.")
        .add(
            "array",
            Declaration::new(vec!["a", "b"]).description("An array of strings."),
        )
        .add(
            "object",
            Declaration::new([("key", "value")]).description("An object of key:value pairs."),
        )
        .add(
            "start",
            Declaration::new(false)
                .short("S")
                .description("Start the server."),
        )
        .build();

    for (name, value) in resolver.get_all(Tiers::command_only()) {
        let spec = resolver.registry().get(&name).unwrap();
        println!("{name} ({}): {value}", spec.type_tag());
    }

    println!("search 'str': {:?}", resolver.search(&["str"]));
}
