mod api;
mod fuzz;

fn suite() -> anyhow::Result<regex_recursive_test::RegexTests> {
    let mut tests = regex_recursive_test::RegexTests::new();
    macro_rules! load {
        ($name:expr) => {{
            const DATA: &[u8] =
                include_bytes!(concat!("../testdata/", $name, ".toml"));
            tests.load_slice($name, DATA)?;
        }};
    }

    load!("alternation");
    load!("anchors");
    load!("basic");
    load!("captures");
    load!("classes");
    load!("repetition");
    load!("syntax");

    Ok(tests)
}
