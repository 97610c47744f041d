use std::panic::{catch_unwind, AssertUnwindSafe};

use arbor_ir::{
    AssemblyRef, BinaryOp, CatchBlock, ConstValue, ElementInit, ExprKind, GotoKind, LabelTarget,
    MemberBinding, MemberSlim, StructuralKind, StructuralProperty, SwitchCase, TypeBinaryOp,
    TypeRange, TypeSlim, UnaryOp,
};
use pretty_assertions::{assert_eq, assert_ne};
use proptest::prelude::*;
use rayon::prelude::*;

use super::*;

const INT: &str = "System.Int32";

/// `(int name) => name + k`
fn add_const(arena: &mut TreeArena, name: &str, k: i64) -> ExprId {
    let int = arena.simple_type(INT, None);
    let x = arena.parameter(name, int);
    let c = arena.constant(ConstValue::Int(k), int);
    let body = arena.binary(BinaryOp::Add, x, c);
    arena.lambda(&[x], body, None)
}

/// `(int outer) => (int inner) => pick(outer, inner)`
fn curried(arena: &mut TreeArena, outer: &str, inner: &str, pick_outer: bool) -> ExprId {
    let int = arena.simple_type(INT, None);
    let a = arena.parameter(outer, int);
    let b = arena.parameter(inner, int);
    let body = if pick_outer { a } else { b };
    let inner = arena.lambda(&[b], body, None);
    arena.lambda(&[a], inner, None)
}

#[test]
fn hashing_is_deterministic() {
    let mut arena = TreeArena::new();
    let root = add_const(&mut arena, "x", 1);

    let first = ExpressionHasher::new();
    let second = ExpressionHasher::new();
    assert_eq!(first.hash_code(&arena, root), first.hash_code(&arena, root));
    assert_eq!(first.hash_code(&arena, root), second.hash_code(&arena, root));
}

#[test]
fn separately_built_trees_hash_equally() {
    let mut left = TreeArena::new();
    let mut right = TreeArena::new();
    // shift the right arena's ids so equal trees get different handles
    right.simple_type("Padding", None);
    let l = add_const(&mut left, "x", 1);
    let r = add_const(&mut right, "x", 1);

    let hasher = ExpressionHasher::new();
    assert_eq!(hasher.hash_code(&left, l), hasher.hash_code(&right, r));
}

#[test]
fn renamed_parameters_hash_equally() {
    let mut arena = TreeArena::new();
    let x = add_const(&mut arena, "x", 1);
    let y = add_const(&mut arena, "y", 1);

    let hasher = ExpressionHasher::new();
    assert_eq!(hasher.hash_code(&arena, x), hasher.hash_code(&arena, y));
}

#[test]
fn constants_and_operand_order_matter() {
    let mut arena = TreeArena::new();
    let plus_one = add_const(&mut arena, "x", 1);
    let plus_two = add_const(&mut arena, "x", 2);

    // (int x) => 1 + x
    let int = arena.simple_type(INT, None);
    let x = arena.parameter("x", int);
    let one = arena.constant(ConstValue::Int(1), int);
    let body = arena.binary(BinaryOp::Add, one, x);
    let one_plus = arena.lambda(&[x], body, None);

    let hasher = ExpressionHasher::new();
    let base = hasher.hash_code(&arena, plus_one);
    assert_ne!(base, hasher.hash_code(&arena, plus_two));
    assert_ne!(base, hasher.hash_code(&arena, one_plus));
}

#[test]
fn nested_lambdas_distinguish_which_binder_is_used() {
    let mut arena = TreeArena::new();
    let xyx = curried(&mut arena, "x", "y", true);
    let aba = curried(&mut arena, "a", "b", true);
    let xyy = curried(&mut arena, "x", "y", false);

    let hasher = ExpressionHasher::new();
    assert_eq!(hasher.hash_code(&arena, xyx), hasher.hash_code(&arena, aba));
    assert_ne!(hasher.hash_code(&arena, xyx), hasher.hash_code(&arena, xyy));
}

#[test]
fn free_variables_hash_by_name() {
    let mut arena = TreeArena::new();
    let int = arena.simple_type(INT, None);
    let p = arena.parameter("p", int);
    let q = arena.parameter("q", int);
    let p_again = arena.parameter("p", int);
    let pp = arena.binary(BinaryOp::Add, p, p);

    let hasher = ExpressionHasher::new();
    assert_ne!(hasher.hash_code(&arena, p), hasher.hash_code(&arena, q));
    assert_eq!(hasher.hash_code(&arena, p), hasher.hash_code(&arena, p_again));
    assert_eq!(hasher.hash_code(&arena, pp), hasher.hash_code(&arena, pp));
}

#[test]
fn generic_arity_changes_the_hash() {
    let mut arena = TreeArena::new();
    let int = arena.simple_type(INT, None);
    let list = arena.generic_definition("List`1", Some("System.Collections"));
    let bare = arena.generic_type(list, &[]);
    let of_int = arena.generic_type(list, &[int]);

    let hasher = ExpressionHasher::new();
    assert_ne!(hasher.hash_type(&arena, bare), hasher.hash_type(&arena, of_int));
    assert_ne!(hasher.hash_type(&arena, list), hasher.hash_type(&arena, bare));
}

#[test]
fn argument_count_changes_the_hash() {
    let mut arena = TreeArena::new();
    let int = arena.simple_type(INT, None);
    let math = arena.simple_type("System.Math", None);
    let abs = arena.simple_method(math, "Abs", &[int], int);
    let one = arena.constant(ConstValue::Int(1), int);
    let none = arena.call(None, abs, &[]);
    let single = arena.call(None, abs, &[one]);

    let hasher = ExpressionHasher::new();
    assert_ne!(hasher.hash_code(&arena, none), hasher.hash_code(&arena, single));
}

/// `R Name<T>(P)` where `R` and `P` are picked from `T` or `int`.
fn generic_method(arena: &mut TreeArena, type_param: &str, param_is_t: bool, ret_is_t: bool) -> MemberId {
    let declaring = arena.simple_type("C", None);
    let int = arena.simple_type(INT, None);
    let t = arena.generic_parameter(type_param);
    let generic_params = arena.push_type_list(&[t]);
    let params = arena.push_type_list(&[if param_is_t { t } else { int }]);
    arena.push_member(MemberSlim::GenericDefinitionMethod {
        declaring,
        name: "Identity".into(),
        generic_params,
        params,
        return_type: if ret_is_t { t } else { int },
    })
}

#[test]
fn generic_method_definitions_are_alpha_equivalent() {
    let mut arena = TreeArena::new();
    let t = generic_method(&mut arena, "T", true, true);
    let u = generic_method(&mut arena, "U", true, true);
    let t_to_int = generic_method(&mut arena, "T", true, false);
    let int_to_t = generic_method(&mut arena, "T", false, true);

    let hasher = ExpressionHasher::new();
    assert_eq!(hasher.hash_member(&arena, t), hasher.hash_member(&arena, u));
    assert_ne!(hasher.hash_member(&arena, t_to_int), hasher.hash_member(&arena, int_to_t));
}

#[test]
fn closed_generic_methods_hash_their_arguments() {
    let mut arena = TreeArena::new();
    let definition = generic_method(&mut arena, "T", true, true);
    let int = arena.simple_type(INT, None);
    let string = arena.simple_type("System.String", None);
    let int_args = arena.push_type_list(&[int]);
    let string_args = arena.push_type_list(&[string]);
    let of_int = arena.push_member(MemberSlim::GenericMethod {
        definition,
        arguments: int_args,
    });
    let of_string = arena.push_member(MemberSlim::GenericMethod {
        definition,
        arguments: string_args,
    });

    let hasher = ExpressionHasher::new();
    assert_ne!(hasher.hash_member(&arena, of_int), hasher.hash_member(&arena, of_string));
}

#[test]
fn block_locals_are_alpha_equivalent() {
    let build = |arena: &mut TreeArena, name: &str| {
        let int = arena.simple_type(INT, None);
        let v = arena.parameter(name, int);
        let one = arena.constant(ConstValue::Int(1), int);
        let assign = arena.binary(BinaryOp::Assign, v, one);
        arena.block(&[v], &[assign, v], Some(int))
    };
    let mut arena = TreeArena::new();
    let a = build(&mut arena, "a");
    let b = build(&mut arena, "b");

    let hasher = ExpressionHasher::new();
    assert_eq!(hasher.hash_code(&arena, a), hasher.hash_code(&arena, b));
}

#[test]
fn catch_variables_are_alpha_equivalent() {
    let build = |arena: &mut TreeArena, name: &str| {
        let exception = arena.simple_type("System.Exception", None);
        let e = arena.parameter(name, exception);
        let body = arena.default_value(exception);
        let handlers = arena.push_catch_blocks(&[CatchBlock {
            test: exception,
            variable: Some(e),
            body: e,
            filter: None,
        }]);
        arena.push_expr(ExprKind::Try {
            ty: Some(exception),
            body,
            handlers,
            finally: None,
            fault: None,
        })
    };
    let mut arena = TreeArena::new();
    let e = build(&mut arena, "e");
    let f = build(&mut arena, "f");

    let hasher = ExpressionHasher::new();
    assert_eq!(hasher.hash_code(&arena, e), hasher.hash_code(&arena, f));
}

#[test]
fn control_flow_nodes_hash_labels_and_cases() {
    let mut arena = TreeArena::new();
    let int = arena.simple_type(INT, None);
    let void = arena.simple_type("System.Void", None);
    let exit = arena.push_label(LabelTarget {
        name: Some("exit".into()),
        ty: None,
    });
    let done = arena.push_label(LabelTarget {
        name: Some("done".into()),
        ty: None,
    });
    let jump = |arena: &mut TreeArena, label| {
        arena.push_expr(ExprKind::Goto {
            kind: GotoKind::Break,
            target: label,
            value: None,
            ty: Some(void),
        })
    };
    let to_exit = jump(&mut arena, exit);
    let to_done = jump(&mut arena, done);
    let loop_exit = arena.push_expr(ExprKind::Loop {
        body: to_exit,
        break_label: Some(exit),
        continue_label: None,
    });
    let loop_done = arena.push_expr(ExprKind::Loop {
        body: to_done,
        break_label: Some(done),
        continue_label: None,
    });

    let one = arena.constant(ConstValue::Int(1), int);
    let two = arena.constant(ConstValue::Int(2), int);
    let switch = |arena: &mut TreeArena, first, second| {
        let tests_a = arena.push_expr_list(&[first]);
        let tests_b = arena.push_expr_list(&[second]);
        let cases = arena.push_switch_cases(&[
            SwitchCase {
                test_values: tests_a,
                body: one,
            },
            SwitchCase {
                test_values: tests_b,
                body: two,
            },
        ]);
        arena.push_expr(ExprKind::Switch {
            ty: Some(int),
            switch_value: one,
            cases,
            default_body: None,
            comparison: None,
        })
    };
    let ordered = switch(&mut arena, one, two);
    let swapped = switch(&mut arena, two, one);

    let hasher = ExpressionHasher::new();
    assert_ne!(hasher.hash_code(&arena, loop_exit), hasher.hash_code(&arena, loop_done));
    assert_ne!(hasher.hash_code(&arena, ordered), hasher.hash_code(&arena, swapped));
}

/// Asserts that no two hashes in `hashes` collide.
fn assert_all_distinct(hashes: &[i32]) {
    let mut sorted = hashes.to_vec();
    sorted.sort_unstable();
    sorted.dedup();
    assert_eq!(sorted.len(), hashes.len(), "colliding hashes in {hashes:?}");
}

#[test]
fn array_rank_is_part_of_the_hash() {
    let mut arena = TreeArena::new();
    let int = arena.simple_type(INT, None);
    let string = arena.simple_type("System.String", None);
    let vector = arena.array_type(int, None);
    let rank_one = arena.array_type(int, Some(1));
    let rank_two = arena.array_type(int, Some(2));
    let strings = arena.array_type(string, None);
    let vector_again = arena.array_type(int, None);

    let hasher = ExpressionHasher::new();
    let hash = |ty| hasher.hash_type(&arena, ty);
    assert_all_distinct(&[hash(vector), hash(rank_one), hash(rank_two), hash(strings)]);
    assert_eq!(hash(vector), hash(vector_again));
}

#[test]
fn structural_types_hash_kind_and_property_order() {
    let mut arena = TreeArena::new();
    let int = arena.simple_type(INT, None);
    let string = arena.simple_type("System.String", None);
    let ab = arena.structural_type(StructuralKind::Record, &[("A", int), ("B", string)]);
    let ba = arena.structural_type(StructuralKind::Record, &[("B", string), ("A", int)]);
    let anonymous = arena.structural_type(StructuralKind::Anonymous, &[("A", int), ("B", string)]);
    let renamed = arena.structural_type(StructuralKind::Record, &[("A", int), ("C", string)]);
    let retyped = arena.structural_type(StructuralKind::Record, &[("A", string), ("B", string)]);
    let ab_again = arena.structural_type(StructuralKind::Record, &[("A", int), ("B", string)]);

    let index_params = arena.push_type_list(&[int]);
    let properties = arena.push_properties(&[
        StructuralProperty {
            name: "A".into(),
            ty: int,
            index_params,
        },
        StructuralProperty {
            name: "B".into(),
            ty: string,
            index_params: TypeRange::EMPTY,
        },
    ]);
    let indexed = arena.push_type(TypeSlim::Structural {
        kind: StructuralKind::Record,
        properties,
    });

    let hasher = ExpressionHasher::new();
    let hash = |ty| hasher.hash_type(&arena, ty);
    assert_all_distinct(&[
        hash(ab),
        hash(ba),
        hash(anonymous),
        hash(renamed),
        hash(retyped),
        hash(indexed),
    ]);
    assert_eq!(hash(ab), hash(ab_again));
}

#[test]
fn fields_properties_and_constructors_hash_by_kind() {
    let mut arena = TreeArena::new();
    let point = arena.simple_type("Point", None);
    let other = arena.simple_type("Other", None);
    let int = arena.simple_type(INT, None);
    let string = arena.simple_type("System.String", None);

    let field = |arena: &mut TreeArena, name: &str, ty| {
        arena.push_member(MemberSlim::Field {
            declaring: point,
            name: name.into(),
            field_type: ty,
        })
    };
    let x_field = field(&mut arena, "X", int);
    let y_field = field(&mut arena, "Y", int);
    let x_string = field(&mut arena, "X", string);

    let property = |arena: &mut TreeArena, index: &[TypeId]| {
        let index_params = arena.push_type_list(index);
        arena.push_member(MemberSlim::Property {
            declaring: point,
            name: "X".into(),
            property_type: int,
            index_params,
        })
    };
    let x_property = property(&mut arena, &[]);
    let x_indexer = property(&mut arena, &[int]);

    let constructor = |arena: &mut TreeArena, declaring, params: &[TypeId]| {
        let params = arena.push_type_list(params);
        arena.push_member(MemberSlim::Constructor { declaring, params })
    };
    let new_int = constructor(&mut arena, point, &[int]);
    let new_int_again = constructor(&mut arena, point, &[int]);
    let new_string = constructor(&mut arena, point, &[string]);
    let new_other = constructor(&mut arena, other, &[int]);
    let ctor_method = arena.simple_method(point, ".ctor", &[int], point);

    let hasher = ExpressionHasher::new();
    let hash = |member| hasher.hash_member(&arena, member);
    assert_all_distinct(&[
        hash(x_field),
        hash(y_field),
        hash(x_string),
        hash(x_property),
        hash(x_indexer),
        hash(new_int),
        hash(new_string),
        hash(new_other),
        hash(ctor_method),
    ]);
    assert_eq!(hash(new_int), hash(new_int_again));
}

#[test]
fn object_and_array_creation_hash_their_parts() {
    let mut arena = TreeArena::new();
    let point = arena.simple_type("Point", None);
    let int = arena.simple_type(INT, None);
    let params = arena.push_type_list(&[int]);
    let ctor = arena.push_member(MemberSlim::Constructor {
        declaring: point,
        params,
    });
    let one = arena.constant(ConstValue::Int(1), int);
    let two = arena.constant(ConstValue::Int(2), int);

    let new = |arena: &mut TreeArena, constructor, args: &[ExprId]| {
        let args = arena.push_expr_list(args);
        let members = arena.push_member_list(&[]);
        arena.push_expr(ExprKind::New {
            ty: Some(point),
            constructor,
            args,
            members,
        })
    };
    let default_ctor = new(&mut arena, None, &[]);
    let with_one = new(&mut arena, Some(ctor), &[one]);
    let with_two = new(&mut arena, Some(ctor), &[two]);

    let array = |arena: &mut TreeArena, bounds: bool, items: &[ExprId]| {
        let items = arena.push_expr_list(items);
        arena.push_expr(if bounds {
            ExprKind::NewArrayBounds {
                element_type: int,
                bounds: items,
            }
        } else {
            ExprKind::NewArrayInit {
                element_type: int,
                exprs: items,
            }
        })
    };
    let init_12 = array(&mut arena, false, &[one, two]);
    let init_21 = array(&mut arena, false, &[two, one]);
    let bounds_12 = array(&mut arena, true, &[one, two]);
    let init_1 = array(&mut arena, false, &[one]);

    let hasher = ExpressionHasher::new();
    let hash = |root| hasher.hash_code(&arena, root);
    assert_all_distinct(&[
        hash(default_ctor),
        hash(with_one),
        hash(with_two),
        hash(init_12),
        hash(init_21),
        hash(bounds_12),
        hash(init_1),
    ]);
}

#[test]
fn member_init_binding_flavors_are_distinct() {
    let mut arena = TreeArena::new();
    let point = arena.simple_type("Point", None);
    let int = arena.simple_type(INT, None);
    let list = arena.simple_type("IntList", None);
    let members = arena.push_member_list(&[]);
    let no_args = arena.push_expr_list(&[]);
    let new_point = arena.push_expr(ExprKind::New {
        ty: Some(point),
        constructor: None,
        args: no_args,
        members,
    });
    let field = |arena: &mut TreeArena, name: &str| {
        arena.push_member(MemberSlim::Field {
            declaring: point,
            name: name.into(),
            field_type: int,
        })
    };
    let x = field(&mut arena, "X");
    let y = field(&mut arena, "Y");
    let add = arena.simple_method(list, "Add", &[int], int);
    let one = arena.constant(ConstValue::Int(1), int);
    let two = arena.constant(ConstValue::Int(2), int);

    let member_init = |arena: &mut TreeArena, bindings: &[MemberBinding]| {
        let bindings = arena.push_bindings(bindings);
        arena.push_expr(ExprKind::MemberInit {
            new_expr: new_point,
            bindings,
        })
    };
    let assign_x = MemberBinding::Assignment { member: x, expr: one };
    let assign_y = MemberBinding::Assignment { member: y, expr: one };
    let nested = arena.push_bindings(&[assign_x.clone()]);
    let add_one = arena.push_expr_list(&[one]);
    let add_two = arena.push_expr_list(&[two]);
    let adds_one = arena.push_element_inits(&[ElementInit {
        add_method: add,
        args: add_one,
    }]);
    let adds_two = arena.push_element_inits(&[ElementInit {
        add_method: add,
        args: add_two,
    }]);

    let assignment = member_init(&mut arena, &[assign_x.clone()]);
    let member = member_init(
        &mut arena,
        &[MemberBinding::Member {
            member: x,
            bindings: nested,
        }],
    );
    let listed = member_init(
        &mut arena,
        &[MemberBinding::List {
            member: x,
            initializers: adds_one,
        }],
    );
    let x_then_y = member_init(&mut arena, &[assign_x.clone(), assign_y.clone()]);
    let y_then_x = member_init(&mut arena, &[assign_y, assign_x]);

    let list_init = |arena: &mut TreeArena, initializers| {
        arena.push_expr(ExprKind::ListInit {
            new_expr: new_point,
            initializers,
        })
    };
    let list_one = list_init(&mut arena, adds_one);
    let list_two = list_init(&mut arena, adds_two);

    let hasher = ExpressionHasher::new();
    let hash = |root| hasher.hash_code(&arena, root);
    assert_all_distinct(&[
        hash(assignment),
        hash(member),
        hash(listed),
        hash(x_then_y),
        hash(y_then_x),
        hash(list_one),
        hash(list_two),
    ]);
}

#[test]
fn unary_type_tests_and_indexers_hash_their_operands() {
    let mut arena = TreeArena::new();
    let int = arena.simple_type(INT, None);
    let long = arena.simple_type("System.Int64", None);
    let string = arena.simple_type("System.String", None);
    let holder = arena.simple_type("Holder", None);
    let x = arena.parameter("x", int);

    let negate = arena.unary(UnaryOp::Negate, x, Some(int));
    let not = arena.unary(UnaryOp::Not, x, Some(int));
    let to_int = arena.unary(UnaryOp::Convert, x, Some(int));
    let to_long = arena.unary(UnaryOp::Convert, x, Some(long));

    let type_test = |arena: &mut TreeArena, op, type_operand| {
        arena.push_expr(ExprKind::TypeBinary {
            op,
            expr: x,
            type_operand,
        })
    };
    let is_int = type_test(&mut arena, TypeBinaryOp::TypeIs, int);
    let equal_int = type_test(&mut arena, TypeBinaryOp::TypeEqual, int);
    let is_string = type_test(&mut arena, TypeBinaryOp::TypeIs, string);

    let index_params = arena.push_type_list(&[int]);
    let item = arena.push_member(MemberSlim::Property {
        declaring: holder,
        name: "Item".into(),
        property_type: string,
        index_params,
    });
    let target = arena.parameter("h", holder);
    let one = arena.constant(ConstValue::Int(1), int);
    let two = arena.constant(ConstValue::Int(2), int);
    let index = |arena: &mut TreeArena, indexer, arg| {
        let args = arena.push_expr_list(&[arg]);
        arena.push_expr(ExprKind::Index {
            object: target,
            indexer,
            args,
        })
    };
    let item_one = index(&mut arena, Some(item), one);
    let item_two = index(&mut arena, Some(item), two);
    let raw_one = index(&mut arena, None, one);

    let hasher = ExpressionHasher::new();
    let hash = |root| hasher.hash_code(&arena, root);
    assert_all_distinct(&[
        hash(negate),
        hash(not),
        hash(to_int),
        hash(to_long),
        hash(is_int),
        hash(equal_int),
        hash(is_string),
        hash(item_one),
        hash(item_two),
        hash(raw_one),
    ]);
}

#[test]
fn stable_options_control_constants_and_assemblies() {
    let mut arena = TreeArena::new();
    let plus_one = add_const(&mut arena, "x", 1);
    let plus_two = add_const(&mut arena, "x", 2);

    let none = ExpressionHasher::stable(StableOptions::NONE);
    let shape = ExpressionHasher::stable(StableOptions::IGNORE_CONSTANTS);
    assert_ne!(none.hash_code(&arena, plus_one), none.hash_code(&arena, plus_two));
    assert_eq!(shape.hash_code(&arena, plus_one), shape.hash_code(&arena, plus_two));

    let versioned = |arena: &mut TreeArena, version: &str| {
        let ty = arena.push_type(TypeSlim::Simple {
            name: "Widget".into(),
            assembly: Some(AssemblyRef::new(format!("Widgets, Version={version}, Culture=neutral"))),
        });
        arena.default_value(ty)
    };
    let v1 = versioned(&mut arena, "1.0.0.0");
    let v2 = versioned(&mut arena, "2.0.0.0");
    let simple = ExpressionHasher::stable(StableOptions::USE_ASSEMBLY_SIMPLE_NAME);
    assert_ne!(none.hash_code(&arena, v1), none.hash_code(&arena, v2));
    assert_eq!(simple.hash_code(&arena, v1), simple.hash_code(&arena, v2));
}

#[test]
fn stable_helper_matches_dedicated_hashers() {
    let mut arena = TreeArena::new();
    let root = add_const(&mut arena, "x", 5);

    for options in [
        StableOptions::NONE,
        StableOptions::IGNORE_CONSTANTS,
        StableOptions::USE_ASSEMBLY_SIMPLE_NAME,
        StableOptions::ALL,
    ] {
        let expected = ExpressionHasher::stable(options).hash_code(&arena, root);
        assert_eq!(stable_hash_code(&arena, root, options), expected);
        assert_eq!(arena.stable_hash_code(root, options), expected);
    }
}

#[test]
fn visitor_returns_to_pool_after_each_call() {
    let mut arena = TreeArena::new();
    let root = add_const(&mut arena, "x", 1);
    let hasher = ExpressionHasher::with_hooks(
        DefaultHashHooks,
        HasherConfig {
            pool_capacity: 2,
            cache_policy: CachePolicy::Unbounded,
        },
    );
    assert_eq!(hasher.idle_visitors(), 0);
    hasher.hash_code(&arena, root);
    hasher.hash_code(&arena, root);
    assert_eq!(hasher.idle_visitors(), 1);
    assert_eq!(hasher.visitors().get().memo_stats(), arbor_memo::CacheStats::default());
}

#[test]
fn panicking_visit_still_returns_a_clean_visitor() {
    let mut arena = TreeArena::new();
    let int = arena.simple_type(INT, None);
    let x = arena.parameter("x", int);
    let params = arena.push_expr_list(&[x]);
    // body handle not allocated by this arena
    let broken = arena.push_expr(ExprKind::Lambda {
        delegate_type: None,
        params,
        body: ExprId::new(10_000),
    });
    let good = add_const(&mut arena, "y", 1);

    let hasher = ExpressionHasher::new();
    let expected = ExpressionHasher::new().hash_code(&arena, good);
    let result = catch_unwind(AssertUnwindSafe(|| hasher.hash_code(&arena, broken)));
    assert!(result.is_err());
    assert_eq!(hasher.idle_visitors(), 1);
    assert_eq!(hasher.hash_code(&arena, good), expected);
}

#[test]
fn concurrent_callers_agree() {
    let mut arena = TreeArena::new();
    let roots: Vec<ExprId> = (0..64)
        .map(|i| {
            let name = format!("v{i}");
            add_const(&mut arena, &name, i % 4)
        })
        .collect();

    let hasher = ExpressionHasher::new();
    let sequential: Vec<i32> = roots.iter().map(|&r| hasher.hash_code(&arena, r)).collect();
    let parallel: Vec<i32> = (0..16)
        .into_par_iter()
        .flat_map_iter(|_| roots.iter().map(|&r| hasher.hash_code(&arena, r)))
        .collect();

    for chunk in parallel.chunks(roots.len()) {
        assert_eq!(chunk, sequential.as_slice());
    }
    assert!(hasher.idle_visitors() <= default_capacity());
}

proptest! {
    #[test]
    fn alpha_equivalence_holds_for_any_names(
        a in "[a-z]{1,8}",
        b in "[a-z]{1,8}",
        k in any::<i64>(),
    ) {
        let mut arena = TreeArena::new();
        let left = add_const(&mut arena, &a, k);
        let right = add_const(&mut arena, &b, k);
        let hasher = ExpressionHasher::stable(StableOptions::NONE);
        prop_assert_eq!(hasher.hash_code(&arena, left), hasher.hash_code(&arena, right));
    }

    #[test]
    fn nested_binders_hash_alike_under_renaming(
        outer in "[a-z]{1,6}",
        inner in "[a-z]{1,6}",
        pick_outer in any::<bool>(),
    ) {
        let mut arena = TreeArena::new();
        let named = curried(&mut arena, &outer, &inner, pick_outer);
        let canonical = curried(&mut arena, "x", "y", pick_outer);
        let hasher = ExpressionHasher::new();
        prop_assert_eq!(hasher.hash_code(&arena, named), hasher.hash_code(&arena, canonical));
    }
}
