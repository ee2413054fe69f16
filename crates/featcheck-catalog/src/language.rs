//! ---
//! fc_section: "04-catalog"
//! fc_subsection: "module"
//! fc_type: "source"
//! fc_scope: "code"
//! fc_description: "Language feature cases."
//! fc_version: "v0.1.0"
//! fc_owner: "tbd"
//! ---
//! Language half of the tour: ownership, generics, closures, constant
//! evaluation and type definitions.

use std::any::{type_name_of_val, TypeId};
use std::borrow::BorrowMut;
use std::cell::Cell;
use std::marker::PhantomData;
use std::ops::Add;
use std::rc::Rc;

use anyhow::Context;
use featcheck_harness::{Category, ExampleCase, Verdict};

/// Language cases in tour order.
pub fn cases() -> Vec<ExampleCase> {
    [
        smart_pointers_unique(),
        move_semantics(),
        move_special_members(),
        forwarding_references(),
        variadic_templates(),
        auto_type_inference(),
        trailing_return_add(),
        initializer_lists(),
        static_assertions(),
        lambda_basics(),
        lambda_captures(),
        lambda_mutable_capture(),
        decltype_inference(),
        template_aliases(),
        nullptr_overload(),
        strongly_typed_enums(),
        constexpr_functions(),
        delegating_constructors(),
        user_defined_literals(),
        explicit_overrides(),
        final_specifier(),
        explicit_conversions(),
        default_functions(),
        deleted_functions(),
        range_based_for(),
        converting_constructors(),
        inline_namespaces(),
    ]
    .into_iter()
    .map(|case| case.in_category(Category::Language))
    .collect()
}

fn smart_pointers_unique() -> ExampleCase {
    ExampleCase::expect_eq(
        "smart_pointers_unique",
        "a uniquely owned heap value keeps its contents when ownership moves",
        42,
        || {
            let p1 = Box::new(42);
            let p2 = p1;
            Ok(*p2)
        },
    )
}

/// Owned buffer with an explicit deep copy and an ownership-stealing move.
#[derive(Debug, PartialEq)]
pub struct Buffer<T> {
    name: String,
    data: Box<[T]>,
}

impl<T: Default + Clone> Buffer<T> {
    pub fn new(name: impl Into<String>, size: usize) -> Self {
        Self {
            name: name.into(),
            data: vec![T::default(); size].into_boxed_slice(),
        }
    }

    fn empty() -> Self {
        Self {
            name: String::new(),
            data: Vec::new().into_boxed_slice(),
        }
    }

    /// Take the contents, leaving `self` empty with size zero.
    pub fn steal(&mut self) -> Self {
        std::mem::replace(self, Self::empty())
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl<T: Default + Clone> Default for Buffer<T> {
    fn default() -> Self {
        Self::new("", 16)
    }
}

impl<T: Clone> Clone for Buffer<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            data: self.data.clone(),
        }
    }
}

fn get_buffer<T: Default + Clone>(name: &str) -> Buffer<T> {
    Buffer::new(name, 128)
}

fn move_semantics() -> ExampleCase {
    ExampleCase::new(
        "move_semantics",
        "moves transfer the heap allocation, copies duplicate it, stolen sources are left empty",
        || {
            let b1: Buffer<i32> = Buffer::default();
            let b2: Buffer<i32> = Buffer::new("buf2", 64);
            let b3 = b2.clone();
            let b4: Buffer<i32> = get_buffer("buf4");

            let original = b2.data.as_ptr();
            let moved = b2;
            let mut source: Buffer<i32> = get_buffer("buf5");
            let stolen = source.steal();

            Ok(Verdict::all([
                Verdict::compare(&16, &b1.len()).noted("default size"),
                Verdict::check(
                    moved.data.as_ptr() == original,
                    "move keeps the allocation",
                    "allocation changed",
                ),
                Verdict::check(
                    b3.data.as_ptr() != original && b3 == moved,
                    "copy is equal but separately allocated",
                    "copy shares storage or differs",
                ),
                Verdict::compare(&("buf4", 128), &(b4.name(), b4.len())),
                Verdict::compare(&(0, 128), &(source.len(), stolen.len()))
                    .noted("stolen source is empty"),
            ]))
        },
    )
}

struct Tracked {
    text: String,
    copies: Rc<Cell<usize>>,
}

impl Tracked {
    fn new(copies: &Rc<Cell<usize>>) -> Self {
        Self {
            text: "test".to_owned(),
            copies: Rc::clone(copies),
        }
    }
}

impl Clone for Tracked {
    fn clone(&self) -> Self {
        self.copies.set(self.copies.get() + 1);
        Self {
            text: self.text.clone(),
            copies: Rc::clone(&self.copies),
        }
    }
}

fn pass_through(value: Tracked) -> Tracked {
    value
}

fn move_special_members() -> ExampleCase {
    ExampleCase::expect_eq(
        "move_special_members",
        "passing and reassigning by value moves; only an explicit clone copies",
        (1, "test".to_owned()),
        || {
            let copies = Rc::new(Cell::new(0));
            let am1 = pass_through(Tracked::new(&copies));
            let mut am2 = am1;
            let am3 = Tracked::new(&copies);
            let displaced = std::mem::replace(&mut am2, am3);
            drop(displaced);
            let am4 = pass_through(am2);
            let copy = am4.clone();
            Ok((copies.get(), copy.text))
        },
    )
}

fn set_five<T: BorrowMut<i32>>(mut target: T) -> T {
    *target.borrow_mut() = 5;
    target
}

fn forwarding_references() -> ExampleCase {
    ExampleCase::expect_eq(
        "forwarding_references",
        "one generic binds both borrowed places and owned temporaries",
        (5, 0, 5),
        || {
            let mut x = 0;
            set_five(&mut x);
            let y = 0;
            let returned = set_five(y);
            Ok((x, y, returned))
        },
    )
}

macro_rules! arity {
    () => { 0usize };
    ($head:ty $(, $tail:ty)*) => { 1usize + arity!($($tail),*) };
}

const _: () = assert!(arity!() == 0);
const _: () = assert!(arity!(char, i16, i32) == 3);

fn variadic_templates() -> ExampleCase {
    ExampleCase::expect_eq(
        "variadic_templates",
        "a recursive macro counts a pack of zero or more types",
        (0, 3),
        || Ok((arity!(), arity!(char, i16, i32))),
    )
}

fn auto_type_inference() -> ExampleCase {
    ExampleCase::expect_eq(
        "auto_type_inference",
        "bindings take the type of their initializer",
        vec!["f64", "i32", "&i32", "bool"],
        || {
            let a = 2.5;
            let b = 1;
            let c = &b;
            let d = b == 1;
            Ok(vec![
                type_name_of_val(&a),
                type_name_of_val(&b),
                type_name_of_val(&c),
                type_name_of_val(&d),
            ])
        },
    )
}

fn add<X: Add<Y>, Y>(x: X, y: Y) -> X::Output {
    x + y
}

fn trailing_return_add() -> ExampleCase {
    ExampleCase::expect_eq(
        "trailing_return_add",
        "the return type follows from the operand types",
        (3, 3.0, "concat".to_owned()),
        || Ok((add(1, 2), add(1.5, 1.5), add(String::from("con"), "cat"))),
    )
}

fn sum(list: &[i32]) -> i32 {
    list.iter().sum()
}

fn initializer_lists() -> ExampleCase {
    ExampleCase::expect_eq(
        "initializer_lists",
        "braced element lists pass as a slice",
        (6, 6, 0),
        || {
            let list = [1, 2, 3];
            Ok((sum(&list), sum(&[1, 2, 3]), sum(&[])))
        },
    )
}

const X1: i32 = 0;
const Y1: i32 = 0;
const _: () = assert!(X1 == Y1, "x1 != y1");
const _: () = assert!(std::mem::size_of::<u32>() == 4);

fn static_assertions() -> ExampleCase {
    ExampleCase::expect_eq(
        "static_assertions",
        "constant assertions hold at compile time and agree at run time",
        (true, 4),
        || Ok((X1 == Y1, std::mem::size_of::<u32>())),
    )
}

/// Lets a closure call itself through an explicit handle.
struct Recursive<'f> {
    body: &'f dyn Fn(&Recursive<'f>, u64) -> u64,
}

impl Recursive<'_> {
    fn call(&self, n: u64) -> u64 {
        (self.body)(self, n)
    }
}

fn lambda_basics() -> ExampleCase {
    ExampleCase::expect_eq(
        "lambda_basics",
        "closures recurse through a handle and add their arguments",
        (8, 12),
        || {
            let fib_body = |this: &Recursive<'_>, n: u64| -> u64 {
                if n < 2 {
                    1
                } else {
                    this.call(n - 1) + this.call(n - 2)
                }
            };
            let fib = Recursive { body: &fib_body };
            let add = |n: i32, m: i32| n + m;
            Ok((fib.call(5), add(5, 7)))
        },
    )
}

fn lambda_captures() -> ExampleCase {
    ExampleCase::expect_eq(
        "lambda_captures",
        "closures capture by value or by reference",
        (1, 2, 1),
        || {
            let x = 1;
            let get_x = move || x;
            let add_x = move |y: i32| x + y;
            let get_x_ref = || &x;
            Ok((get_x(), add_x(1), *get_x_ref()))
        },
    )
}

fn lambda_mutable_capture() -> ExampleCase {
    ExampleCase::expect_eq(
        "lambda_mutable_capture",
        "a by-reference capture mutates the original, a moved copy does not",
        (2, 2, 1),
        || {
            let mut x = 1;
            let mut f1 = || x = 2;
            f1();

            let mut y = 1;
            let mut f3 = move || {
                y += 1;
                y
            };
            let inner = f3();
            Ok((x, inner, y))
        },
    )
}

fn decltype_inference() -> ExampleCase {
    ExampleCase::expect_eq(
        "decltype_inference",
        "the declared type of an expression is observable",
        vec!["i32", "&i32", "f64"],
        || {
            let aa = 1;
            let bb = aa;
            let cc = &aa;
            let sum = add(1.0, 2.0);
            Ok(vec![
                type_name_of_val(&bb),
                type_name_of_val(&cc),
                type_name_of_val(&sum),
            ])
        },
    )
}

type Vec2<T> = Vec<T>;
type Str = String;

fn template_aliases() -> ExampleCase {
    ExampleCase::new(
        "template_aliases",
        "generic type aliases name the same type",
        || {
            let vec: Vec2<i32> = Vec::new();
            let s: Str = "foo".into();
            Ok(Verdict::all([
                Verdict::check(
                    TypeId::of::<Vec2<i32>>() == TypeId::of::<Vec<i32>>(),
                    "Vec2<i32> is Vec<i32>",
                    "distinct types",
                ),
                Verdict::compare(&0, &vec.len()),
                Verdict::compare("foo", s.as_str()),
            ]))
        },
    )
}

trait Describe {
    fn describe(self) -> &'static str;
}

impl Describe for i32 {
    fn describe(self) -> &'static str {
        "int"
    }
}

impl Describe for Option<&str> {
    fn describe(self) -> &'static str {
        "pointer"
    }
}

fn nullptr_overload() -> ExampleCase {
    ExampleCase::expect_eq(
        "nullptr_overload",
        "a typed null selects the pointer overload, never the integer one",
        ("pointer", "int", true),
        || {
            Ok((
                None::<&str>.describe(),
                0_i32.describe(),
                std::ptr::null::<u8>().is_null(),
            ))
        },
    )
}

#[repr(u32)]
#[derive(Debug, Clone, Copy)]
enum Color {
    Red = 0xff0000,
    Green = 0xff00,
    Blue = 0xff,
}

#[repr(u8)]
#[derive(Debug, Clone, Copy)]
enum Alert {
    #[allow(dead_code)]
    Red,
    Green,
}

fn strongly_typed_enums() -> ExampleCase {
    ExampleCase::expect_eq(
        "strongly_typed_enums",
        "scoped enums carry an explicit underlying type",
        (0xff0000_u32, 0xff00_u32, 0xff_u32, 1_u8),
        || {
            Ok((
                Color::Red as u32,
                Color::Green as u32,
                Color::Blue as u32,
                Alert::Green as u8,
            ))
        },
    )
}

const fn square(x: i32) -> i32 {
    x * x
}

fn square2(x: i32) -> i32 {
    x * x
}

struct Complex {
    re: f64,
    im: f64,
}

impl Complex {
    const fn new(re: f64, im: f64) -> Self {
        Self { re, im }
    }

    const fn real(&self) -> f64 {
        self.re
    }

    const fn imag(&self) -> f64 {
        self.im
    }
}

const SQUARE_OF_TWO: i32 = square(2);
const I: Complex = Complex::new(0.0, 1.0);
const I_IMAG: f64 = I.imag();

fn constexpr_functions() -> ExampleCase {
    ExampleCase::expect_eq(
        "constexpr_functions",
        "const functions evaluate at compile time and match their runtime twins",
        (4, 4, 0.0, 1.0),
        || Ok((SQUARE_OF_TWO, square2(2), I.real(), I_IMAG)),
    )
}

struct Foo {
    foo: i32,
}

impl Foo {
    fn new(foo: i32) -> Self {
        Self { foo }
    }
}

impl Default for Foo {
    fn default() -> Self {
        Self::new(0)
    }
}

fn delegating_constructors() -> ExampleCase {
    ExampleCase::expect_eq(
        "delegating_constructors",
        "a constructor delegates to another",
        (0, 7),
        || Ok((Foo::default().foo, Foo::new(7).foo)),
    )
}

trait Temperature {
    fn celsius(self) -> i64;
}

impl Temperature for u64 {
    fn celsius(self) -> i64 {
        (self as f64 * 1.8 + 32.0).round() as i64
    }
}

trait Squared {
    fn squared(self) -> u64;
}

impl Squared for u64 {
    fn squared(self) -> u64 {
        self * self
    }
}

trait ParseInt {
    fn to_int(&self) -> anyhow::Result<i32>;
}

impl ParseInt for str {
    fn to_int(&self) -> anyhow::Result<i32> {
        self.parse::<i32>()
            .with_context(|| format!("`{self}` is not an integer literal"))
    }
}

fn user_defined_literals() -> ExampleCase {
    ExampleCase::expect_eq(
        "user_defined_literals",
        "extension methods stand in for literal suffixes",
        (75, 25, 36, 123),
        || {
            Ok((
                24_u64.celsius(),
                5_u64.squared(),
                6_u64.squared(),
                "123".to_int()?,
            ))
        },
    )
}

trait Base {
    fn foo(&self) -> &'static str {
        "Base::foo"
    }

    fn bar(&self) -> &'static str {
        "Base::bar"
    }
}

struct Derived;

impl Base for Derived {
    fn foo(&self) -> &'static str {
        "Derived::foo"
    }
}

fn explicit_overrides() -> ExampleCase {
    ExampleCase::expect_eq(
        "explicit_overrides",
        "an override replaces only the method it names",
        ("Derived::foo", "Base::bar"),
        || {
            let object: &dyn Base = &Derived;
            Ok((object.foo(), object.bar()))
        },
    )
}

mod sealed {
    pub trait Sealed {}
}

/// Implementable only inside this module tree.
pub trait Polygon: sealed::Sealed {
    fn sides(&self) -> u32;
}

struct Triangle;
struct Square;

impl sealed::Sealed for Triangle {}
impl sealed::Sealed for Square {}

impl Polygon for Triangle {
    fn sides(&self) -> u32 {
        3
    }
}

impl Polygon for Square {
    fn sides(&self) -> u32 {
        4
    }
}

fn final_specifier() -> ExampleCase {
    ExampleCase::expect_eq(
        "final_specifier",
        "a sealed trait admits no implementations outside its crate",
        vec![3, 4],
        || {
            let shapes: [&dyn Polygon; 2] = [&Triangle, &Square];
            Ok(shapes.iter().map(|shape| shape.sides()).collect::<Vec<_>>())
        },
    )
}

struct Implicit;
struct Explicit;

impl From<Implicit> for bool {
    fn from(_: Implicit) -> Self {
        true
    }
}

impl Explicit {
    fn as_bool(&self) -> bool {
        true
    }
}

fn explicit_conversions() -> ExampleCase {
    ExampleCase::expect_eq(
        "explicit_conversions",
        "a conversion is either offered to `into` or must be spelled out",
        (true, true),
        || {
            let converted: bool = Implicit.into();
            let spelled_out = Explicit.as_bool();
            Ok((converted, spelled_out))
        },
    )
}

struct WithDefault {
    x: i32,
}

impl WithDefault {
    fn new(x: i32) -> Self {
        Self { x }
    }
}

impl Default for WithDefault {
    fn default() -> Self {
        Self { x: 1 }
    }
}

#[derive(Default)]
struct Inherits(WithDefault);

fn default_functions() -> ExampleCase {
    ExampleCase::expect_eq(
        "default_functions",
        "derived defaults delegate to their fields' defaults",
        (1, 123, 1),
        || {
            Ok((
                WithDefault::default().x,
                WithDefault::new(123).x,
                Inherits::default().0.x,
            ))
        },
    )
}

struct NoCopy {
    x: i32,
}

struct CloneCheck<T>(PhantomData<T>);

trait NotClone {
    fn is_clone(&self) -> bool {
        false
    }
}

impl<T> NotClone for CloneCheck<T> {}

impl<T: Clone> CloneCheck<T> {
    fn is_clone(&self) -> bool {
        true
    }
}

fn deleted_functions() -> ExampleCase {
    ExampleCase::expect_eq(
        "deleted_functions",
        "a type without Clone cannot be copied",
        (false, true, 123),
        || {
            let ax = NoCopy { x: 123 };
            Ok((
                CloneCheck::<NoCopy>(PhantomData).is_clone(),
                CloneCheck::<String>(PhantomData).is_clone(),
                ax.x,
            ))
        },
    )
}

fn range_based_for() -> ExampleCase {
    ExampleCase::expect_eq(
        "range_based_for",
        "iterating by mutable reference edits in place, by value edits copies",
        ([2, 4, 6, 8, 10], [1, 2, 3, 4, 5], vec![2, 4, 6, 8, 10]),
        || {
            let mut arr = [1, 2, 3, 4, 5];
            for x in arr.iter_mut() {
                *x *= 2;
            }
            let arr2 = [1, 2, 3, 4, 5];
            let mut copies = Vec::with_capacity(arr2.len());
            for mut x in arr2 {
                x *= 2;
                copies.push(x);
            }
            Ok((arr, arr2, copies))
        },
    )
}

struct Arity(usize);

impl From<i32> for Arity {
    fn from(_: i32) -> Self {
        Arity(1)
    }
}

impl From<(i32, i32)> for Arity {
    fn from(_: (i32, i32)) -> Self {
        Arity(2)
    }
}

impl From<(i32, i32, i32)> for Arity {
    fn from(_: (i32, i32, i32)) -> Self {
        Arity(3)
    }
}

impl From<&[i32]> for Arity {
    fn from(list: &[i32]) -> Self {
        Arity(list.len())
    }
}

fn converting_constructors() -> ExampleCase {
    ExampleCase::expect_eq(
        "converting_constructors",
        "conversions pick the matching shape and never narrow silently",
        (1, 2, 3, 4, true),
        || {
            let one = Arity::from(0_i32);
            let two: Arity = (0_i32, 0_i32).into();
            let three = Arity::from((0_i32, 0_i32, 0_i32));
            let list = Arity::from(&[0_i32; 4][..]);
            let narrowing_rejected = u8::try_from(300_i32).is_err();
            Ok((one.0, two.0, three.0, list.0, narrowing_rejected))
        },
    )
}

mod program {
    pub mod version1 {
        pub fn get_version() -> i32 {
            1
        }

        pub fn is_first_version() -> bool {
            true
        }
    }

    pub mod version2 {
        pub fn get_version() -> i32 {
            2
        }
    }

    pub use self::version2::*;
}

fn inline_namespaces() -> ExampleCase {
    ExampleCase::expect_eq(
        "inline_namespaces",
        "a re-exported module's items resolve through its parent",
        (2, 1, true),
        || {
            Ok((
                program::get_version(),
                program::version1::get_version(),
                program::version1::is_first_version(),
            ))
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_language_case_passes_inline() {
        for case in cases() {
            let verdict = case
                .execute()
                .unwrap_or_else(|err| panic!("{} errored: {err:#}", case.name()));
            assert_eq!(verdict, Verdict::Pass, "{}", case.name());
        }
    }

    #[test]
    fn stolen_buffer_keeps_name_and_contents() {
        let mut source: Buffer<u8> = Buffer::new("scratch", 4);
        let stolen = source.steal();
        assert_eq!(stolen.name(), "scratch");
        assert_eq!(stolen.len(), 4);
        assert!(source.is_empty());
        assert_eq!(source.name(), "");
    }

    #[test]
    fn non_numeric_literal_is_an_error() {
        let err = "12a".to_int().unwrap_err();
        assert!(format!("{err:#}").contains("`12a` is not an integer literal"));
    }

    #[test]
    fn celsius_rounds_to_nearest() {
        assert_eq!(0_u64.celsius(), 32);
        assert_eq!(100_u64.celsius(), 212);
    }
}
