use yamlite::parse;

fn main() -> miette::Result<()> {
    let yaml = "person:\n\
                \x20 name: John Doe\n\
                \x20 age: 30\n\
                \x20 email: john.doe@example.com\n\
                \x20 address:\n\
                \x20   street: 123 Main St\n\
                \x20   city: Springfield\n\
                \x20   zip: 12345\n";

    let root = parse(yaml)?;
    let person = root.get("person").expect("person key");
    let address = person.get("address").expect("address key");

    let text = |node: Option<&yamlite::Node>| {
        node.and_then(|n| n.as_str()).unwrap_or("N/A").to_string()
    };

    println!("Name:   {}", text(person.get("name")));
    println!("Age:    {}", person.get("age").expect("age key").convert::<i32>().unwrap_or(0));
    println!("Email:  {}", text(person.get("email")));
    println!("Street: {}", text(address.get("street")));
    println!("City:   {}", text(address.get("city")));
    println!("Zip:    {}", address.get("zip").expect("zip key").convert::<i64>().unwrap_or(0));
    Ok(())
}
