//! Member canonicalization: reconcile an observed member instance with its
//! declaration, then erase its signature.

use tern_ir::{ClassId, MemberId, TypeId};
use tern_stack::ensure_sufficient_stack;
use tern_types::{TypeKind, TypeSystem};

use crate::{CanonError, Eraser};

impl Eraser {
    /// Canonical form of `member`.
    ///
    /// Every instance denoting the same declared member, through any chain
    /// of instantiations, yields the same result. Fails only when the
    /// member's container declares nothing that substitutes to it.
    #[tracing::instrument(level = "debug", skip_all, fields(member = member.raw()))]
    pub fn canonicalize_member(
        &mut self,
        ts: &mut TypeSystem,
        member: MemberId,
    ) -> Result<MemberId, CanonError> {
        if let Some(&cached) = self.members.get(&member) {
            return Ok(cached);
        }
        let canonical = ensure_sufficient_stack(|| self.reconcile_member(ts, member))?;
        self.members.insert(member, canonical);
        self.members.insert(canonical, canonical);
        Ok(canonical)
    }

    fn reconcile_member(&mut self, ts: &mut TypeSystem, member: MemberId) -> Result<MemberId, CanonError> {
        let container = ts.member(member).container;
        let erased = self.erase_own_type_params(ts, member);

        let reconciled = match ts.kind(container) {
            TypeKind::Subst { base, .. } => {
                let declared = self.find_declared(ts, member, erased, container, base)?;
                tracing::trace!(
                    from = %ts.member_display(member),
                    to = %ts.member_display(declared),
                    "reconciled with declaration"
                );
                // The declaration may still need its own round of erasure.
                return self.canonicalize_member(ts, declared);
            }
            TypeKind::Class(class) => match self.class_erasure_subst(ts, class) {
                Some(subst) => ts.subst_member(erased, subst, container),
                None => erased,
            },
            _ => erased,
        };
        Ok(self.erase_signature(ts, reconciled))
    }

    /// Replace a generic method's own type parameters by their erasure.
    ///
    /// Instantiated methods go back to their generic form first, so an
    /// inferred call site and the declaration compare equal.
    fn erase_own_type_params(&mut self, ts: &mut TypeSystem, member: MemberId) -> MemberId {
        let generic = ts.generic_form(member);
        match self.member_erasure_subst(ts, generic) {
            Some(subst) => {
                let container = ts.member(generic).container;
                ts.subst_member(generic, subst, container)
            }
            None => member,
        }
    }

    /// The member declared on `base` whose image under `container` is
    /// `erased`.
    ///
    /// The declaration back-reference is tried first; the declared members
    /// are scanned when it does not hold.
    fn find_declared(
        &mut self,
        ts: &mut TypeSystem,
        member: MemberId,
        erased: MemberId,
        container: TypeId,
        base: ClassId,
    ) -> Result<MemberId, CanonError> {
        let subst = ts.full_subst(container);

        let hint = ts.member(member).decl;
        if ts.class(base).members.contains(&hint) {
            let image = ts.subst_member(hint, subst, container);
            if self.erase_own_type_params(ts, image) == erased {
                return Ok(hint);
            }
        }

        let declared = ts.class(base).members.clone();
        for candidate in declared {
            let image = ts.subst_member(candidate, subst, container);
            if self.erase_own_type_params(ts, image) == erased {
                return Ok(candidate);
            }
        }

        let err = CanonError::Unreconcilable {
            member: ts.member_display(member),
            container: ts.display_name(container),
        };
        tracing::error!(%err, "member reconciliation failed");
        Err(err)
    }

    /// Pass every signature type through the type canonicalizer.
    fn erase_signature(&mut self, ts: &mut TypeSystem, member: MemberId) -> MemberId {
        let data = ts.member(member);
        let (kind, container) = (data.kind.clone(), data.container);
        let erased_kind = kind
            .map_types(|t| self.canonicalize(ts, t))
            .without_type_params();
        let erased_container = self.canonicalize(ts, container);
        if erased_kind == kind && erased_container == container {
            return member;
        }
        ts.derive_member(member, erased_kind, erased_container)
    }
}

#[cfg(test)]
mod tests;
