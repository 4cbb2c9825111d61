use anyhow::Result;
use test_case::test_case;

use cypherproj::cypher_projection_generator::{
    compile_field, Cardinality, FieldDescriptor, ProjectionError, RelDirection,
    RootVariableNames, ThreadState,
};
use cypherproj::graph_schema::{SchemaRegistry, SchemaTypeDef};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

const SCHEMA_YAML: &str = r#"
types:
  - name: Person
    kind: node
  - name: Movie
    kind: node
  - name: Genre
    kind: node
  - name: User
    kind: node
  - name: ACTED_IN
    kind: relationship
    relation:
      name: ACTED_IN
      from_type: Person
      to_type: Movie
  - name: FOLLOWS
    kind: relationship
    relation:
      name: FOLLOWS
      from_type: User
      to_type: User
"#;

fn registry() -> SchemaRegistry {
    SchemaRegistry::from_yaml(SCHEMA_YAML).unwrap()
}

#[test]
fn movie_endpoint_on_acted_in_matches_expected_pattern() -> Result<()> {
    init_logging();
    let registry = registry();
    let acted_in = registry.resolve("ACTED_IN")?;
    let movie = registry.resolve("Movie")?;

    let field = FieldDescriptor::new("Movie", Cardinality::List, "acted_in", "acted_in_movie")
        .with_sub_selection(".title,.year");
    let compiled = compile_field("", &field, acted_in, Some(movie), None, ThreadState::default())?;

    // Anchored at the opposite endpoint (Person), traversing through the
    // bound relationship-identity variable into a fresh Movie node, with the
    // sub-selection taken verbatim.
    assert_eq!(
        compiled.initial,
        "Movie: [(:Person)-[acted_in_relation]->(acted_in_movie:Movie) | acted_in_movie {.title,.year}] "
    );
    Ok(())
}

#[test]
fn reflexive_from_alias_singular_matches_expected_pattern() -> Result<()> {
    init_logging();
    let registry = registry();
    let follows = registry.resolve("FOLLOWS")?;

    let field = FieldDescriptor::new("from", Cardinality::Singular, "follows", "follows_from")
        .with_sub_selection(".since");
    let compiled = compile_field("", &field, follows, None, None, ThreadState::default())?;

    assert_eq!(
        compiled.initial,
        "from: head([(follows)<-[follows_from_relation:FOLLOWS]-(follows_from:User) | follows_from_relation {.since}]) "
    );
    Ok(())
}

#[test_case(Cardinality::Singular, true ; "singular is head wrapped")]
#[test_case(Cardinality::List, false ; "list is unwrapped")]
fn cardinality_coercion_on_node_relation(cardinality: Cardinality, wrapped: bool) {
    init_logging();
    let registry = registry();
    let movie = registry.resolve("Movie").unwrap();
    let genre = SchemaTypeDef::node("Genre");

    let field = FieldDescriptor::new("genres", cardinality, "movie", "movie_genres")
        .with_rel("IN_GENRE", RelDirection::Out)
        .with_sub_selection(".name");
    let compiled =
        compile_field("", &field, movie, Some(&genre), None, ThreadState::default()).unwrap();

    assert_eq!(compiled.initial.contains("head("), wrapped);
    assert_eq!(compiled.initial.trim_end().ends_with(')'), wrapped);
}

#[test_case(Cardinality::Singular, true ; "singular endpoint is head wrapped")]
#[test_case(Cardinality::List, false ; "list endpoint is unwrapped")]
fn cardinality_coercion_on_general_endpoint(cardinality: Cardinality, wrapped: bool) {
    init_logging();
    let registry = registry();
    let acted_in = registry.resolve("ACTED_IN").unwrap();
    let movie = registry.resolve("Movie").unwrap();

    let field = FieldDescriptor::new("Movie", cardinality, "acted_in", "acted_in_movie")
        .with_sub_selection(".title");
    let compiled =
        compile_field("", &field, acted_in, Some(movie), None, ThreadState::default()).unwrap();

    assert_eq!(compiled.initial.contains("head("), wrapped);
}

#[test_case("in", "<-[:IN_GENRE]-" ; "inbound arrow on the left")]
#[test_case("IN", "<-[:IN_GENRE]-" ; "uppercase inbound recognized")]
#[test_case("out", "-[:IN_GENRE]->" ; "outbound arrow on the right")]
#[test_case("OUT", "-[:IN_GENRE]->" ; "uppercase outbound recognized")]
fn direction_symmetry_on_node_relation(direction: &str, expected_edge: &str) {
    init_logging();
    let registry = registry();
    let movie = registry.resolve("Movie").unwrap();
    let genre = SchemaTypeDef::node("Genre");

    let field = FieldDescriptor::new("genres", Cardinality::List, "movie", "movie_genres")
        .with_rel("IN_GENRE", RelDirection::parse(direction))
        .with_sub_selection(".name");
    let compiled =
        compile_field("", &field, movie, Some(&genre), None, ThreadState::default()).unwrap();

    assert!(
        compiled.initial.contains(expected_edge),
        "direction '{}' produced {}",
        direction,
        compiled.initial
    );
}

#[test]
fn endpoint_field_swap_mirrors_the_arrow() -> Result<()> {
    init_logging();
    let registry = registry();
    let follows = registry.resolve("FOLLOWS")?;

    let from = FieldDescriptor::new("from", Cardinality::List, "follows", "follows_from")
        .with_sub_selection(".since");
    let to = FieldDescriptor::new("to", Cardinality::List, "follows", "follows_to")
        .with_sub_selection(".since");

    let from_out = compile_field("", &from, follows, None, None, ThreadState::default())?;
    let to_out = compile_field("", &to, follows, None, None, ThreadState::default())?;

    assert!(from_out.initial.contains("(follows)<-[follows_from_relation:FOLLOWS]-("));
    assert!(to_out.initial.contains("(follows)-[follows_to_relation:FOLLOWS]->("));
    Ok(())
}

#[test]
fn discriminator_injection_is_idempotent_and_first() -> Result<()> {
    init_logging();
    let registry = registry();
    let person = registry.resolve("Person")?;

    let field = FieldDescriptor::new("media", Cardinality::List, "person", "person_media")
        .with_rel("APPEARED_IN", RelDirection::Out)
        .with_inline_fragment("Movie")
        .with_sub_selection(".title");

    let first = compile_field("", &field, person, None, None, ThreadState::default())?;
    let second = compile_field("", &field, person, None, None, ThreadState::default())?;

    assert_eq!(first.initial, second.initial);
    assert_eq!(first.initial.matches("FRAGMENT_TYPE").count(), 1);
    // Discriminator is the first entry of the projection body.
    assert!(first
        .initial
        .contains("| person_media {FRAGMENT_TYPE: \"Movie\",.title}"));
    Ok(())
}

#[test]
fn mutation_payload_siblings_alternate_without_traversal() -> Result<()> {
    init_logging();
    let registry = registry();
    let follows = registry.resolve("FOLLOWS")?;
    let user = registry.resolve("User")?;

    let root = RootVariableNames::new("user_from", "user_to");
    let state = ThreadState::for_mutation_payload(root);

    let from = FieldDescriptor::new("from", Cardinality::Singular, "user_from", "x")
        .with_sub_selection(".name")
        .with_comma_if_tail(",");
    let compiled = compile_field("", &from, follows, Some(user), None, state)?;
    assert_eq!(compiled.initial, "from: user_from {.name} ,");
    assert!(!compiled.initial.contains('['), "payload fields never traverse");

    // Drive the swapped variable into the sibling the way the driver would.
    let next_variable = compiled.tail.next_variable.clone().unwrap();
    assert_eq!(next_variable, "user_to");
    let to = FieldDescriptor::new("to", Cardinality::Singular, next_variable, "x")
        .with_sub_selection(".name");
    let compiled = compile_field(&compiled.initial, &to, follows, Some(user), None, compiled.tail)?;

    assert_eq!(
        compiled.initial,
        "from: user_from {.name} ,to: user_to {.name} "
    );
    assert_eq!(compiled.tail.next_variable.as_deref(), Some("user_from"));
    Ok(())
}

#[test]
fn mutation_payload_from_twice_resolves_from_descriptor() -> Result<()> {
    init_logging();
    let registry = registry();
    let follows = registry.resolve("FOLLOWS")?;

    let state = ThreadState::for_mutation_payload(RootVariableNames::new("a", "b"));
    let from = FieldDescriptor::new("from", Cardinality::Singular, "a", "x");

    let first = compile_field("", &from, follows, None, None, state)?;
    let second = compile_field("", &from, follows, None, None, first.tail.clone())?;
    assert_eq!(first.tail.next_variable, second.tail.next_variable);
    Ok(())
}

#[test]
fn custom_query_splices_into_projection() -> Result<()> {
    init_logging();
    let registry = registry();
    let movie = registry.resolve("Movie")?;

    let field = FieldDescriptor::new("similar", Cardinality::List, "movie", "x")
        .with_sub_selection(".title,.year");
    let fragment = "MATCH ({this})--(:Genre)--(o:Movie) RETURN o";
    let compiled = compile_field("", &field, movie, None, Some(fragment), ThreadState::default())?;

    assert_eq!(
        compiled.initial,
        "similar: [ (movie)--(:Genre)--(o:Movie) | o {.title,.year}] "
    );
    Ok(())
}

#[test]
fn custom_query_on_relationship_container_suffixes_variable() -> Result<()> {
    init_logging();
    let registry = registry();
    let acted_in = registry.resolve("ACTED_IN")?;

    let field = FieldDescriptor::new("credits", Cardinality::Singular, "acted_in", "x")
        .with_sub_selection(".amount");
    let fragment = "MATCH ({this})-->(c:Credit) RETURN c";
    let compiled =
        compile_field("", &field, acted_in, None, Some(fragment), ThreadState::default())?;

    assert_eq!(
        compiled.initial,
        "credits: head([ (acted_in_relation)-->(c:Credit) | c {.amount}]) "
    );
    Ok(())
}

#[test]
fn malformed_custom_query_is_rejected() {
    init_logging();
    let registry = registry();
    let movie = registry.resolve("Movie").unwrap();

    let field = FieldDescriptor::new("similar", Cardinality::List, "movie", "x");
    let err = compile_field(
        "",
        &field,
        movie,
        None,
        Some("MATCH (o:Movie)"),
        ThreadState::default(),
    )
    .unwrap_err();
    assert_eq!(
        err,
        ProjectionError::MissingReturnVariable {
            field_name: "similar".to_string()
        }
    );
}

#[test]
fn nested_selections_compose_depth_first() -> Result<()> {
    init_logging();
    let registry = registry();
    let movie = registry.resolve("Movie")?;
    let person = registry.resolve("Person")?;
    let genre = SchemaTypeDef::node("Genre");

    // Innermost level: genres of a movie, compiled first by the driver.
    let genres = FieldDescriptor::new("genres", Cardinality::List, "person_movie", "genre")
        .with_rel("IN_GENRE", RelDirection::Out)
        .with_sub_selection(".name");
    let inner = compile_field(
        ".title, ",
        &genres,
        movie,
        Some(&genre),
        None,
        ThreadState::default(),
    )?;

    // Outer level consumes the accumulated inner projection as its body.
    let movies = FieldDescriptor::new("movies", Cardinality::List, "person", "person_movie")
        .with_rel("ACTED_IN", RelDirection::Out)
        .with_sub_selection(inner.initial.trim_end())
        .with_skip_limit(" LIMIT 10");
    let outer = compile_field("", &movies, person, Some(movie), None, ThreadState::default())?;

    assert_eq!(
        outer.initial,
        "movies: [(person)-[:ACTED_IN]->(person_movie:Movie) | person_movie \
         {.title, genres: [(person_movie)-[:IN_GENRE]->(genre:Genre) | genre {.name}]}] LIMIT 10 "
    );
    Ok(())
}

#[test]
fn sibling_accumulation_appends_in_order() -> Result<()> {
    init_logging();
    let registry = registry();
    let movie = registry.resolve("Movie")?;
    let person = registry.resolve("Person")?;
    let genre = SchemaTypeDef::node("Genre");

    let genres = FieldDescriptor::new("genres", Cardinality::List, "movie", "movie_genres")
        .with_rel("IN_GENRE", RelDirection::Out)
        .with_sub_selection(".name")
        .with_comma_if_tail(",");
    let first = compile_field("", &genres, movie, Some(&genre), None, ThreadState::default())?;

    let actors = FieldDescriptor::new("actors", Cardinality::List, "movie", "movie_actors")
        .with_rel("ACTED_IN", RelDirection::In)
        .with_sub_selection(".name");
    let second = compile_field(
        &first.initial,
        &actors,
        movie,
        Some(person),
        None,
        first.tail,
    )?;

    assert!(second.initial.starts_with(&first.initial));
    assert_eq!(
        second.initial,
        "genres: [(movie)-[:IN_GENRE]->(movie_genres:Genre) | movie_genres {.name}] ,\
         actors: [(movie)<-[:ACTED_IN]-(movie_actors:Person) | movie_actors {.name}] "
    );
    Ok(())
}
