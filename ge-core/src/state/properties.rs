use super::{Derivative::*, PartialDerivative, State, RGAS};
use crate::ge_model::GeModel;
use ndarray::{Array1, Array2};

/// The excess Gibbs energy together with all its first and second
/// partial derivatives with respect to temperature and mole numbers.
#[derive(Clone, Debug)]
pub struct ExcessGibbsDerivatives {
    /// Excess Gibbs energy $G^\mathrm{E}$ in J
    pub ge: f64,
    /// $\left(\frac{\partial G^\mathrm{E}}{\partial T}\right)_{n_i}$ in J/K
    pub dge_dt: f64,
    /// $\left(\frac{\partial^2 G^\mathrm{E}}{\partial T^2}\right)_{n_i}$ in J/K²
    pub d2ge_dt2: f64,
    /// $\left(\frac{\partial G^\mathrm{E}}{\partial n_i}\right)_{T,n_j}$ in J/mol
    pub dge_dn: Array1<f64>,
    /// $\frac{\partial^2 G^\mathrm{E}}{\partial T\partial n_i}$ in J/(mol K)
    pub d2ge_dtdn: Array1<f64>,
    /// $\frac{\partial^2 G^\mathrm{E}}{\partial n_i\partial n_j}$ in J/mol²
    pub d2ge_dn2: Array2<f64>,
}

impl<G: GeModel> State<G> {
    fn get_or_compute_derivative(&self, derivative: PartialDerivative) -> f64 {
        self.cache
            .lock()
            .unwrap()
            .get_or_insert_with(derivative, || self.evaluate(derivative))
    }

    /// Evaluate $g$ with the number type that carries `derivative` and return
    /// every partial derivative obtained along the way.
    fn evaluate(&self, derivative: PartialDerivative) -> Vec<(PartialDerivative, f64)> {
        use PartialDerivative::*;
        match derivative {
            Zeroth => {
                let g = self.model.reduced_excess_gibbs_energy(&self.derive0());
                vec![(Zeroth, g)]
            }
            First(v) => {
                let g = self.model.reduced_excess_gibbs_energy(&self.derive1(v));
                vec![(Zeroth, g.re), (First(v), g.eps)]
            }
            Second(v1, v2) if v1 == v2 => {
                let g = self.model.reduced_excess_gibbs_energy(&self.derive2(v1));
                vec![(Zeroth, g.re), (First(v1), g.v1), (derivative, g.v2)]
            }
            Second(v1, v2) => {
                let g = self
                    .model
                    .reduced_excess_gibbs_energy(&self.derive2_mixed(v1, v2));
                vec![
                    (Zeroth, g.re),
                    (First(v1), g.eps1),
                    (First(v2), g.eps2),
                    (derivative, g.eps1eps2),
                ]
            }
        }
    }

    /// $g=\frac{G^\mathrm{E}}{RT}$
    fn g(&self) -> f64 {
        self.get_or_compute_derivative(PartialDerivative::Zeroth)
    }

    fn dg_dt(&self) -> f64 {
        self.get_or_compute_derivative(PartialDerivative::First(DT))
    }

    fn d2g_dt2(&self) -> f64 {
        self.get_or_compute_derivative(PartialDerivative::second(DT, DT))
    }

    fn dg_dn(&self) -> Array1<f64> {
        Array1::from_shape_fn(self.model.components(), |i| {
            self.get_or_compute_derivative(PartialDerivative::First(DN(i)))
        })
    }

    fn d2g_dtdn(&self) -> Array1<f64> {
        Array1::from_shape_fn(self.model.components(), |i| {
            self.get_or_compute_derivative(PartialDerivative::second(DT, DN(i)))
        })
    }

    fn d2g_dn2(&self) -> Array2<f64> {
        let n = self.model.components();
        Array2::from_shape_fn((n, n), |(i, j)| {
            self.get_or_compute_derivative(PartialDerivative::second(DN(i), DN(j)))
        })
    }

    /// Excess Gibbs energy: $G^\mathrm{E}=RTg$
    pub fn excess_gibbs_energy(&self) -> f64 {
        RGAS * self.temperature * self.g()
    }

    /// Molar excess Gibbs energy: $g^\mathrm{E}=\frac{G^\mathrm{E}}{n}$
    pub fn molar_excess_gibbs_energy(&self) -> f64 {
        self.excess_gibbs_energy() / self.total_moles
    }

    /// Partial derivative of the excess Gibbs energy w.r.t. temperature: $\left(\frac{\partial G^\mathrm{E}}{\partial T}\right)_{n_i}$
    pub fn dge_dt(&self) -> f64 {
        RGAS * (self.g() + self.temperature * self.dg_dt())
    }

    /// Second partial derivative of the excess Gibbs energy w.r.t. temperature: $\left(\frac{\partial^2 G^\mathrm{E}}{\partial T^2}\right)_{n_i}$
    pub fn d2ge_dt2(&self) -> f64 {
        RGAS * (2.0 * self.dg_dt() + self.temperature * self.d2g_dt2())
    }

    /// Partial derivative of the excess Gibbs energy w.r.t. mole numbers: $\left(\frac{\partial G^\mathrm{E}}{\partial n_i}\right)_{T,n_j}$
    pub fn dge_dn(&self) -> Array1<f64> {
        self.dg_dn() * (RGAS * self.temperature)
    }

    /// Mixed partial derivative of the excess Gibbs energy: $\frac{\partial^2 G^\mathrm{E}}{\partial T\partial n_i}$
    pub fn d2ge_dtdn(&self) -> Array1<f64> {
        (self.dg_dn() + self.d2g_dtdn() * self.temperature) * RGAS
    }

    /// Second partial derivative of the excess Gibbs energy w.r.t. mole numbers: $\frac{\partial^2 G^\mathrm{E}}{\partial n_i\partial n_j}$
    pub fn d2ge_dn2(&self) -> Array2<f64> {
        self.d2g_dn2() * (RGAS * self.temperature)
    }

    /// Excess Gibbs energy and all its first and second partial derivatives.
    pub fn excess_gibbs_energy_derivatives(&self) -> ExcessGibbsDerivatives {
        // mixed derivatives first, they fill the cache for everything else
        let d2ge_dn2 = self.d2ge_dn2();
        let d2ge_dtdn = self.d2ge_dtdn();
        let d2ge_dt2 = self.d2ge_dt2();
        ExcessGibbsDerivatives {
            ge: self.excess_gibbs_energy(),
            dge_dt: self.dge_dt(),
            d2ge_dt2,
            dge_dn: self.dge_dn(),
            d2ge_dtdn,
            d2ge_dn2,
        }
    }

    /// Logarithm of the activity coefficients: $\ln\gamma_i=\frac{1}{RT}\left(\frac{\partial G^\mathrm{E}}{\partial n_i}\right)_{T,n_j}$
    pub fn ln_gamma(&self) -> Array1<f64> {
        self.dg_dn()
    }

    /// Activity coefficients: $\gamma_i$
    pub fn activity_coefficient(&self) -> Array1<f64> {
        self.ln_gamma().mapv(f64::exp)
    }

    /// Partial derivative of the logarithmic activity coefficients w.r.t. temperature: $\left(\frac{\partial\ln\gamma_i}{\partial T}\right)_{n_j}$
    pub fn dln_gamma_dt(&self) -> Array1<f64> {
        self.d2g_dtdn()
    }

    /// Partial derivative of the logarithmic activity coefficients w.r.t. mole numbers: $\left(\frac{\partial\ln\gamma_i}{\partial n_j}\right)_{T,n_k}$
    pub fn dln_gamma_dn(&self) -> Array2<f64> {
        self.d2g_dn2()
    }

    /// Excess enthalpy: $H^\mathrm{E}=G^\mathrm{E}-T\left(\frac{\partial G^\mathrm{E}}{\partial T}\right)_{n_i}=-RT^2\left(\frac{\partial g}{\partial T}\right)_{n_i}$
    pub fn excess_enthalpy(&self) -> f64 {
        -RGAS * self.temperature.powi(2) * self.dg_dt()
    }

    /// Molar excess enthalpy: $h^\mathrm{E}=\frac{H^\mathrm{E}}{n}$
    pub fn molar_excess_enthalpy(&self) -> f64 {
        self.excess_enthalpy() / self.total_moles
    }

    /// Partial derivative of the excess enthalpy w.r.t. temperature: $\left(\frac{\partial H^\mathrm{E}}{\partial T}\right)_{n_i}$
    pub fn dhe_dt(&self) -> f64 {
        -self.temperature * self.d2ge_dt2()
    }

    /// Partial derivative of the excess enthalpy w.r.t. mole numbers: $\left(\frac{\partial H^\mathrm{E}}{\partial n_i}\right)_{T,n_j}$
    pub fn dhe_dn(&self) -> Array1<f64> {
        self.dge_dn() - self.d2ge_dtdn() * self.temperature
    }

    /// Excess entropy: $S^\mathrm{E}=-\left(\frac{\partial G^\mathrm{E}}{\partial T}\right)_{n_i}$
    pub fn excess_entropy(&self) -> f64 {
        -self.dge_dt()
    }

    /// Molar excess entropy: $s^\mathrm{E}=\frac{S^\mathrm{E}}{n}$
    pub fn molar_excess_entropy(&self) -> f64 {
        self.excess_entropy() / self.total_moles
    }

    /// Partial derivative of the excess entropy w.r.t. temperature: $\left(\frac{\partial S^\mathrm{E}}{\partial T}\right)_{n_i}$
    pub fn dse_dt(&self) -> f64 {
        -self.d2ge_dt2()
    }

    /// Partial derivative of the excess entropy w.r.t. mole numbers: $\left(\frac{\partial S^\mathrm{E}}{\partial n_i}\right)_{T,n_j}$
    pub fn dse_dn(&self) -> Array1<f64> {
        -self.d2ge_dtdn()
    }

    /// Excess heat capacity: $C_p^\mathrm{E}=\left(\frac{\partial H^\mathrm{E}}{\partial T}\right)_{n_i}$
    pub fn excess_heat_capacity(&self) -> f64 {
        self.dhe_dt()
    }
}
