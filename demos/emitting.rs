use yamlite::{emit, Node, NodeKind};

fn main() -> miette::Result<()> {
    let mut root = Node::new(NodeKind::Map);

    let person = root.entry("person")?;
    person.set(Vec::<(String, Node)>::new());
    person.entry("name")?.set("John Doe");
    person.entry("age")?.set(30);

    print!("{}", emit(&root)?);
    Ok(())
}
