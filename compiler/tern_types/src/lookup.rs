//! Field, method and constructor lookup.

use rustc_hash::FxHashSet;

use tern_ir::{MemberId, Name, TypeId};

use crate::error::LookupError;
use crate::kind::TypeKind;
use crate::member::MemberKind;
use crate::TypeSystem;

impl TypeSystem {
    /// Find field `name` on `container` or its supertypes.
    ///
    /// The result is the field as seen from the type that declares it,
    /// substituted when that type is an instantiation.
    #[tracing::instrument(level = "trace", skip(self), fields(container = %self.display_name(container)))]
    pub fn find_field(&mut self, container: TypeId, name: &str) -> Result<MemberId, LookupError> {
        let name_id = self.intern(name);
        for ty in self.lookup_chain(container)? {
            let Some(class) = self.class_of(ty) else { continue };
            let found = self.class(class).members.iter().copied().find(|&m| {
                matches!(self.member(m).kind, MemberKind::Field { name: n, .. } if n == name_id)
            });
            if let Some(decl) = found {
                return Ok(self.member_in(decl, ty));
            }
        }
        Err(LookupError::NoField {
            container: self.display_name(container),
            name: name.to_owned(),
        })
    }

    /// Find the most specific method `name` applicable to `args`.
    #[tracing::instrument(level = "trace", skip(self, args), fields(container = %self.display_name(container)))]
    pub fn find_method(
        &mut self,
        container: TypeId,
        name: &str,
        args: &[TypeId],
    ) -> Result<MemberId, LookupError> {
        let name_id = self.intern(name);
        let mut candidates: Vec<MemberId> = Vec::new();
        for ty in self.lookup_chain(container)? {
            let Some(class) = self.class_of(ty) else { continue };
            let declared: Vec<MemberId> = self.class(class).members.clone();
            for decl in declared {
                if !matches!(self.member(decl).kind, MemberKind::Method { name: n, .. } if n == name_id) {
                    continue;
                }
                let image = self.member_in(decl, ty);
                if !self.is_applicable(image, args) {
                    continue;
                }
                // An override hides the inherited method with the same formals.
                let overridden = candidates.iter().any(|&c| {
                    self.member(c).kind.formals() == self.member(image).kind.formals()
                });
                if !overridden {
                    candidates.push(image);
                }
            }
        }
        self.most_specific(candidates).map_err(|count| {
            let container = self.display_name(container);
            let args = self.display_list(args);
            if count == 0 {
                LookupError::NoMethod {
                    container,
                    name: name.to_owned(),
                    args,
                }
            } else {
                LookupError::Ambiguous {
                    container,
                    name: name.to_owned(),
                    args,
                    candidates: count,
                }
            }
        })
    }

    /// Find the most specific constructor of `container` applicable to `args`.
    ///
    /// Constructors are not inherited; only the class itself is searched.
    #[tracing::instrument(level = "trace", skip(self, args), fields(container = %self.display_name(container)))]
    pub fn find_constructor(&mut self, container: TypeId, args: &[TypeId]) -> Result<MemberId, LookupError> {
        let Some(class) = self.class_of(container) else {
            return Err(LookupError::NotAReference {
                ty: self.display_name(container),
            });
        };
        let declared: Vec<MemberId> = self.class(class).members.clone();
        let mut candidates = Vec::new();
        for decl in declared {
            if !matches!(self.member(decl).kind, MemberKind::Constructor { .. }) {
                continue;
            }
            let image = self.member_in(decl, container);
            if self.is_applicable(image, args) {
                candidates.push(image);
            }
        }
        self.most_specific(candidates).map_err(|count| {
            let container_name = self.display_name(container);
            let args = self.display_list(args);
            if count == 0 {
                LookupError::NoConstructor {
                    container: container_name,
                    args,
                }
            } else {
                LookupError::Ambiguous {
                    container: container_name,
                    name: "<init>".to_owned(),
                    args,
                    candidates: count,
                }
            }
        })
    }

    /// Look up a class by qualified name, as a lookup error when missing.
    pub fn require_class(&mut self, name: &str) -> Result<TypeId, LookupError> {
        match self.class_by_name(name) {
            Some(class) => Ok(self.class_type(class)),
            None => Err(LookupError::NoClass { name: name.to_owned() }),
        }
    }

    /// `container` followed by all of its supertypes, breadth-first, each
    /// once. Arrays and type variables search `core.Object` (through their
    /// bound, for type variables).
    fn lookup_chain(&mut self, container: TypeId) -> Result<Vec<TypeId>, LookupError> {
        let start = match self.kind(container) {
            TypeKind::Prim(_) | TypeKind::Null => {
                return Err(LookupError::NotAReference {
                    ty: self.display_name(container),
                })
            }
            TypeKind::Lub(_) => self.resolve_lub(container),
            _ => container,
        };
        let mut chain = vec![start];
        let mut seen: FxHashSet<TypeId> = FxHashSet::default();
        seen.insert(start);
        let mut next = 0;
        while next < chain.len() {
            let current = chain[next];
            next += 1;
            for sup in self.supertypes(current) {
                if seen.insert(sup) {
                    chain.push(sup);
                }
            }
        }
        Ok(chain)
    }

    /// Whether `args` convert to the formals of procedure `member`.
    ///
    /// Own type parameters of a generic method accept anything within
    /// their bound.
    fn is_applicable(&self, member: MemberId, args: &[TypeId]) -> bool {
        let formals = self.member(member).kind.formals();
        formals.len() == args.len()
            && formals
                .iter()
                .zip(args)
                .all(|(&formal, &arg)| self.is_assignable(arg, self.bound_erasure(formal)))
    }

    /// Pick the candidate whose formals convert to every other candidate's.
    /// `Err(n)` carries the number of candidates when there is no single winner.
    fn most_specific(&self, candidates: Vec<MemberId>) -> Result<MemberId, usize> {
        let more_specific = |a: MemberId, b: MemberId| {
            let fa = self.member(a).kind.formals();
            let fb = self.member(b).kind.formals();
            fa.iter().zip(fb).all(|(&x, &y)| self.is_assignable(x, y))
        };
        let maximal: Vec<MemberId> = candidates
            .iter()
            .copied()
            .filter(|&a| candidates.iter().all(|&b| a == b || more_specific(a, b)))
            .collect();
        match maximal.as_slice() {
            [only] => Ok(*only),
            _ => Err(candidates.len()),
        }
    }

    fn display_list(&self, types: &[TypeId]) -> String {
        types
            .iter()
            .map(|&t| self.display_name(t))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Name of a member, interned; `<init>` for constructors.
    pub fn member_name(&self, member: MemberId) -> Name {
        match self.member(member).kind.name() {
            Some(name) => name,
            None => self.intern("<init>"),
        }
    }
}
