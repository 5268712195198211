mod util;
use util::*;
use pretty_assertions::assert_eq;

#[test]
fn non_recursive_definition() {
    let (_, table, profile) = resolve("
        type Profile = record {
            name: text;
            tags: vec text;
            avatar: opt blob;
            kind: variant { user; admin };
        };
    ", "Profile");
    assert!(!table.has_recursion(profile));
    assert_eq!(labels(&table, profile), vec![ "name", "tags", "avatar", "kind" ]);
    let kind = fields(&table, profile)[3].type_id;
    assert_eq!(labels(&table, kind), vec![ "user", "admin" ]);
    assert_eq!(table.get(fields(&table, kind)[0].type_id), &Type::Primitive(ast::Primitive::Null));
}

#[test]
fn recursive_definition() {
    let (_, table, list) = resolve("type List = opt record { head: nat; tail: List };", "List");
    assert!(table.has_recursion(list));
    let record = match table.get(list) {
        Type::Opt(record) => *record,
        other => panic!("Expected opt, got {:?}", other),
    };
    assert_eq!(labels(&table, record), vec![ "head", "tail" ]);
    match table.get(fields(&table, record)[1].type_id) {
        Type::Recursive(recursive) => {
            assert_eq!(recursive.name, "List");
            assert_eq!(recursive.target, list);
        },
        other => panic!("Expected recursive reference, got {:?}", other),
    }
}

#[test]
fn resolution_is_memoized() {
    let program = program("type List = opt record { head: nat; tail: List };");
    let mut table = TypeTable::new();
    let first = program.resolve_name("List", &mut table).unwrap();
    let lookups = table.lookups();
    let len = table.len();
    let second = program.resolve_name("List", &mut table).unwrap();
    assert_eq!(first, second);
    assert_eq!(table.lookups(), lookups);
    assert_eq!(table.len(), len);
    assert_eq!(table.named("List"), Some(first));
}

#[test]
fn shared_definition_resolved_once() {
    let program = program("
        type Point = record { x: int; y: int };
        type Line = record { from: Point; to: Point };
    ");
    let mut table = TypeTable::new();
    let line = program.resolve_name("Line", &mut table).unwrap();
    assert_eq!(table.lookups(), 2);
    let fields = fields(&table, line);
    assert_eq!(fields[0].type_id, fields[1].type_id);
    assert_eq!(table.named("Point"), Some(fields[0].type_id));
}

#[test]
fn mutual_recursion() {
    let program = program("
        type Tree = variant { leaf: nat; node: Forest };
        type Forest = vec Tree;
    ");
    let mut table = TypeTable::new();
    let tree = program.resolve_name("Tree", &mut table).unwrap();
    let forest = program.resolve_name("Forest", &mut table).unwrap();
    assert_eq!(table.lookups(), 2);
    assert_eq!(fields(&table, tree)[1].type_id, forest);
    match table.get(forest) {
        Type::Vector(element) => assert_eq!(table.get(*element), &Type::Recursive(Recursive { name: "Tree".to_string(), target: tree })),
        other => panic!("Expected vec, got {:?}", other),
    }
    assert_eq!(table.follow(TypeId::from(3)), tree);
}

#[test]
fn alias_resolves_to_target() {
    let (_, table, alias) = resolve("type Name = Text;\ntype Text = text;", "Name");
    assert_eq!(table.get(alias), &Type::Primitive(ast::Primitive::Text));
}

#[test]
fn unknown_type() {
    let src = "type A = record { b: B };";
    let program = program(src);
    let mut table = TypeTable::new();
    let error = program.resolve_name("A", &mut table).unwrap_err();
    assert_eq!(error.kind(), &ResolveErrorKind::UnknownType("B".to_string()));
    assert_eq!(error.name(), "B");
    assert_eq!(error.loc(src), Some((1, 22)));
    assert!(table.is_empty());
    assert_eq!(table.named("A"), None);
}

#[test]
fn unknown_root_name() {
    let error = resolve_source("type A = nat;", "Missing").unwrap_err();
    match &error {
        Error::Resolve(error) => {
            assert_eq!(error.name(), "Missing");
            assert_eq!(error.position(), None);
        },
        other => panic!("Expected resolve error, got {:?}", other),
    }
    assert!(!error.is_malformed());
    assert_eq!(error.loc("type A = nat;"), None);
}

#[test]
fn unguarded_recursion() {
    let program = program("type A = B;\ntype B = A;\ntype C = nat;\ntype D = D;");
    let mut table = TypeTable::new();
    let error = program.resolve_name("A", &mut table).unwrap_err();
    assert_eq!(error.kind(), &ResolveErrorKind::UnguardedRecursion("A".to_string()));
    let error = program.resolve_name("D", &mut table).unwrap_err();
    assert_eq!(error.kind(), &ResolveErrorKind::UnguardedRecursion("D".to_string()));
    assert_eq!(table.named("B"), None);
    let c = program.resolve_name("C", &mut table).unwrap();
    assert_eq!(table.get(c), &Type::Primitive(ast::Primitive::Nat));
}

#[test]
fn failure_rolls_back() {
    let program = program("
        type Fine = nat;
        type Bad = record { a: Fine; self: opt Bad; b: Missing };
    ");
    let mut table = TypeTable::new();
    let fine = program.resolve_name("Fine", &mut table).unwrap();
    let len = table.len();
    let error = program.resolve_name("Bad", &mut table).unwrap_err();
    assert_eq!(error.name(), "Missing");
    assert_eq!(table.len(), len);
    assert_eq!(table.named("Fine"), Some(fine));
    assert_eq!(table.named("Bad"), None);
    // a second attempt fails the same way rather than tying a stale recursive reference
    let again = program.resolve_name("Bad", &mut table).unwrap_err();
    assert_eq!(again, error);
}

#[test]
fn resolve_all_in_order() {
    let program = program("type B = vec A;\ntype A = nat;\ntype C = record { vec B; nat };");
    let mut table = TypeTable::new();
    let resolved = program.resolve_all(&mut table).unwrap();
    let names: Vec<_> = resolved.iter().map(|(name, _)| name.as_str()).collect();
    assert_eq!(names, vec![ "B", "A", "C" ]);
    assert_eq!(table.lookups(), 3);
    assert_eq!(labels(&table, resolved[2].1), vec![ "0", "1" ]);
}

#[test]
fn resolve_expression() {
    let program = program("type A = nat;");
    let mut table = TypeTable::new();
    let expr = TypeExpr::Vector(Box::new(TypeExpr::Named(ast::NamedTypeRef { name: "A".to_string(), position: Position(0) })));
    let vector = program.resolve(&expr, &mut table).unwrap();
    assert_eq!(table.display(vector).to_string(), "vec nat");
}

#[test]
fn service_methods() {
    let program = program("service : { foo: (nat) -> (text) query; bar: () -> () }");
    let mut table = TypeTable::new();
    let service = program.actor_type(&mut table).unwrap().unwrap();
    let methods = table.methods(service).unwrap();
    assert_eq!(methods.len(), 2);
    assert_eq!(methods[0].0, "foo");
    assert_eq!(methods[0].1.args.len(), 1);
    assert_eq!(methods[0].1.rets.len(), 1);
    assert!(methods[0].1.is_query());
    assert_eq!(methods[1].0, "bar");
    assert!(methods[1].1.args.is_empty());
    assert!(methods[1].1.rets.is_empty());
    assert!(!methods[1].1.is_query());
}

#[test]
fn method_referring_to_func_definition() {
    let program = program("type F = func (text) -> (nat);\nservice : { f: F }");
    let mut table = TypeTable::new();
    let service = program.actor_type(&mut table).unwrap().unwrap();
    let methods = table.methods(service).unwrap();
    assert_eq!(methods[0].0, "f");
    assert_eq!(methods[0].1.args.len(), 1);
}

#[test]
fn method_referring_to_non_func() {
    let program = program("type N = nat;\nservice : { f: N }");
    let mut table = TypeTable::new();
    let error = program.actor_type(&mut table).unwrap_err();
    assert_eq!(error.kind(), &ResolveErrorKind::NotAFunction("N".to_string()));
}

#[test]
fn named_service() {
    let program = program("type S = service { ping: () -> () };\nservice : S");
    let mut table = TypeTable::new();
    let service = program.actor_type(&mut table).unwrap().unwrap();
    let names: Vec<_> = table.methods(service).unwrap().into_iter().map(|(name, _)| name).collect();
    assert_eq!(names, vec![ "ping" ]);
}

#[test]
fn named_service_not_a_service() {
    let program = program("type N = nat;\nservice : N");
    let mut table = TypeTable::new();
    let error = program.actor_type(&mut table).unwrap_err();
    assert_eq!(error.kind(), &ResolveErrorKind::NotAService("N".to_string()));
    assert!(table.is_empty());
}

#[test]
fn no_service() {
    let program = program("type A = nat;");
    let mut table = TypeTable::new();
    assert_eq!(program.actor_type(&mut table).unwrap(), None);
    assert_eq!(program.actor_init(&mut table).unwrap(), None);
}

#[test]
fn service_init_args() {
    let program = program("type Config = record { owner: principal };\nservice : (config: Config, nat) -> { get: () -> (nat) query }");
    let mut table = TypeTable::new();
    let init = program.actor_init(&mut table).unwrap().unwrap();
    assert_eq!(init.len(), 2);
    assert_eq!(init[0].name.as_deref(), Some("config"));
    assert_eq!(Some(init[0].type_id), table.named("Config"));
    assert_eq!(init[1].name, None);
    assert_eq!(table.get(init[1].type_id), &Type::Primitive(ast::Primitive::Nat));
}

#[test]
fn recursive_service() {
    let program = program("type S = service { next: () -> (S) };\nservice : S");
    let mut table = TypeTable::new();
    let service = program.actor_type(&mut table).unwrap().unwrap();
    assert!(table.has_recursion(service));
    assert_eq!(table.display(service).to_string(), "service { next: () -> (S); }");
}

#[test]
fn display_resolved_types() {
    let (program, mut table, list) = resolve("
        type List = opt record { head: nat; tail: List };
        type Result = variant { ok; err: text };
        type Pair = record { text; nat };
    ", "List");
    assert_eq!(table.display(list).to_string(), "opt record { head: nat; tail: List; }");
    let result = program.resolve_name("Result", &mut table).unwrap();
    assert_eq!(table.display(result).to_string(), "variant { ok; err: text; }");
    let pair = program.resolve_name("Pair", &mut table).unwrap();
    assert_eq!(table.display(pair).to_string(), "record { text; nat; }");

    let program = parse("service : { foo: (nat) -> (text) query; bar: () -> () }").unwrap();
    let service = program.actor_type(&mut table).unwrap().unwrap();
    assert_eq!(table.display(service).to_string(), "service { foo: (nat) -> (text) query; bar: () -> (); }");
}

#[test]
fn definition_adds_no_detached_nodes() {
    // slot, nat, recursive reference, record
    let (_, table, _) = resolve("type List = opt record { head: nat; tail: List };", "List");
    assert_eq!(table.len(), 4);
    // slot, text, nat
    let (_, table, _) = resolve("type Pair = record { text; nat };", "Pair");
    assert_eq!(table.len(), 3);
    // one slot per name plus text
    let (_, table, _) = resolve("type Name = Text;\ntype Text = text;", "Name");
    assert_eq!(table.len(), 2);
}

#[test]
fn every_node_is_reachable() {
    let program = program("
        type Tree = variant { leaf: nat; node: Forest };
        type Forest = vec Tree;
        type S = service { walk: (Tree) -> (Forest) query };
    ");
    let mut table = TypeTable::new();
    let resolved = program.resolve_all(&mut table).unwrap();
    let mut reached = vec![ false; table.len() ];
    let mut pending: Vec<_> = resolved.iter().map(|(_, id)| *id).collect();
    while let Some(id) = pending.pop() {
        if std::mem::replace(&mut reached[id.into_usize()], true) {
            continue;
        }
        match table.get(id) {
            Type::Primitive(_) => { },
            Type::Vector(inner) | Type::Opt(inner) => pending.push(*inner),
            Type::Record(fields) | Type::Variant(fields) => pending.extend(fields.iter().map(|f| f.type_id)),
            Type::Func(func) => pending.extend(func.args.iter().chain(func.rets.iter()).map(|a| a.type_id)),
            Type::Service(service) => pending.extend(service.methods.iter().map(|m| m.type_id)),
            Type::Recursive(recursive) => pending.push(recursive.target),
        }
    }
    assert!(reached.iter().all(|&r| r));
}

#[test]
fn method_referring_to_enclosing_service() {
    let src = "type S = service { f: S; g: () -> () };\nservice : S";
    let program = program(src);
    let mut table = TypeTable::new();
    let error = program.actor_type(&mut table).unwrap_err();
    assert_eq!(error.kind(), &ResolveErrorKind::NotAFunction("S".to_string()));
    assert_eq!(error.loc(src), Some((1, 23)));
    assert!(table.is_empty());
}

#[test]
fn method_referring_to_alias_of_enclosing_service() {
    let program = program("type S = service { f: F };\ntype F = S;\nservice : S");
    let mut table = TypeTable::new();
    let error = program.actor_type(&mut table).unwrap_err();
    assert_eq!(error.kind(), &ResolveErrorKind::NotAFunction("F".to_string()));
}

#[test]
fn method_referring_to_enclosing_func() {
    let (_, table, func) = resolve("type F = func () -> (service { again: F });", "F");
    let service = match table.get(func) {
        Type::Func(func) => func.rets[0].type_id,
        other => panic!("Expected func, got {:?}", other),
    };
    let methods = table.methods(service).unwrap();
    assert_eq!(methods.len(), 1);
    assert_eq!(methods[0].0, "again");
    assert!(methods[0].1.rets.len() == 1);
}

#[test]
fn methods_of_non_service() {
    let (_, table, id) = resolve("type N = vec nat;", "N");
    let error = table.methods(id).unwrap_err();
    assert_eq!(error.kind(), &ResolveErrorKind::NotAService("vec nat".to_string()));
    assert_eq!(error.position(), None);
}
