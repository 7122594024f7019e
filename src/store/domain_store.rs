//! Registro en memoria de flota, clientes, agentes, contratos y leads
//!
//! Mapas indexados por id (lookup O(1), referencias colgantes explícitas
//! vía Option) con listados ordenados por fecha de creación. Las escrituras
//! son last-write-wins; no hay control de concurrencia más allá del RwLock
//! que envuelve al store en el AppState.

use std::collections::HashMap;

use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::models::agent::{Agent, AgentStatus};
use crate::models::car::{Car, CarStatus};
use crate::models::client::Client;
use crate::models::company::CompanyProfile;
use crate::models::contract::{Contract, ContractStatus, PhotoKind};
use crate::models::lead::{LeadStatus, MarketingLead};
use crate::utils::validation::normalize_plate;

/// Política de borrado en cascada.
///
/// El borrado es asimétrico a propósito: borrar un cliente arrastra sus
/// contratos, borrar un coche o un agente no. La asimetría queda explícita
/// detrás de esta política en vez de repartida por los callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CascadePolicy {
    /// Solo el borrado de cliente cascada a sus contratos (default)
    ClientContractsOnly,
    /// Ningún borrado cascada; los contratos quedan huérfanos
    None,
}

/// Datos de entrada para crear un contrato
#[derive(Debug, Clone)]
pub struct NewContract {
    pub agent_id: Uuid,
    pub client_id: Uuid,
    pub car_id: Uuid,
    pub start_date: chrono::NaiveDate,
    pub end_date: chrono::NaiveDate,
    pub total_amount: Decimal,
}

#[derive(Debug)]
pub struct DomainStore {
    cars: HashMap<Uuid, Car>,
    clients: HashMap<Uuid, Client>,
    agents: HashMap<Uuid, Agent>,
    contracts: HashMap<Uuid, Contract>,
    leads: HashMap<Uuid, MarketingLead>,
    company: CompanyProfile,
    cascade_policy: CascadePolicy,
}

impl Default for DomainStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DomainStore {
    pub fn new() -> Self {
        Self::with_policy(CascadePolicy::ClientContractsOnly)
    }

    pub fn with_policy(cascade_policy: CascadePolicy) -> Self {
        Self {
            cars: HashMap::new(),
            clients: HashMap::new(),
            agents: HashMap::new(),
            contracts: HashMap::new(),
            leads: HashMap::new(),
            company: CompanyProfile::default(),
            cascade_policy,
        }
    }

    // ==================== Flota ====================

    /// Alta de vehículo. Devuelve false si la targa ya existe en la flota.
    pub fn add_car(&mut self, car: Car) -> bool {
        if self.plate_exists(&car.plate, None) {
            log::warn!("❌ Targa duplicada rechazada: {}", car.plate);
            return false;
        }
        self.cars.insert(car.id, car);
        true
    }

    /// ¿Existe ya esta targa? Comparación normalizada, con exclusión
    /// opcional del propio vehículo (para updates).
    pub fn plate_exists(&self, plate: &str, exclude: Option<Uuid>) -> bool {
        let normalized = normalize_plate(plate);
        self.cars
            .values()
            .any(|c| normalize_plate(&c.plate) == normalized && Some(c.id) != exclude)
    }

    /// Reemplazo por id. No-op (false) si el id no existe.
    pub fn update_car(&mut self, car: Car) -> bool {
        if !self.cars.contains_key(&car.id) {
            return false;
        }
        self.cars.insert(car.id, car);
        true
    }

    /// Borrado por id. Los contratos que lo referencian quedan huérfanos
    /// (ver CascadePolicy).
    pub fn delete_car(&mut self, id: Uuid) -> bool {
        self.cars.remove(&id).is_some()
    }

    /// Sobrescritura directa del estado; el resto de la flota no se toca.
    pub fn update_car_status(&mut self, id: Uuid, status: CarStatus) -> bool {
        match self.cars.get_mut(&id) {
            Some(car) => {
                car.status = status;
                true
            }
            None => false,
        }
    }

    /// Ciclo manual Available → Rented → Maintenance → Available
    pub fn cycle_car_status(&mut self, id: Uuid) -> Option<CarStatus> {
        let car = self.cars.get_mut(&id)?;
        car.status = car.status.next();
        Some(car.status)
    }

    pub fn car(&self, id: Uuid) -> Option<&Car> {
        self.cars.get(&id)
    }

    pub fn cars(&self) -> Vec<Car> {
        let mut list: Vec<Car> = self.cars.values().cloned().collect();
        list.sort_by_key(|c| (c.created_at, c.id));
        list
    }

    /// Subconjunto alquilable de la flota (input del wizard de recomendación)
    pub fn available_cars(&self) -> Vec<Car> {
        self.cars()
            .into_iter()
            .filter(|c| c.status == CarStatus::Available)
            .collect()
    }

    // ==================== Clientes ====================

    pub fn add_client(&mut self, client: Client) {
        self.clients.insert(client.id, client);
    }

    pub fn update_client(&mut self, client: Client) -> bool {
        if !self.clients.contains_key(&client.id) {
            return false;
        }
        self.clients.insert(client.id, client);
        true
    }

    /// Borrado de cliente. Con la política por defecto arrastra todos los
    /// contratos cuyo client_id coincide; los contratos de otros clientes
    /// no se tocan.
    pub fn delete_client(&mut self, id: Uuid) -> bool {
        let removed = self.clients.remove(&id).is_some();
        if removed && self.cascade_policy == CascadePolicy::ClientContractsOnly {
            let before = self.contracts.len();
            self.contracts.retain(|_, c| c.client_id != id);
            let dropped = before - self.contracts.len();
            if dropped > 0 {
                log::info!("🗑️ Cascade: {} contratos eliminados con el cliente {}", dropped, id);
            }
        }
        removed
    }

    /// Sobrescribir el risk score (resultado del análisis AI)
    pub fn set_client_risk_score(&mut self, id: Uuid, score: u8) -> bool {
        match self.clients.get_mut(&id) {
            Some(client) => {
                client.risk_score = score.min(100);
                true
            }
            None => false,
        }
    }

    /// Registrar un documento local en la ficha del cliente
    pub fn add_client_document(
        &mut self,
        id: Uuid,
        document: crate::models::client::ClientDocument,
    ) -> bool {
        match self.clients.get_mut(&id) {
            Some(client) => {
                client.documents.push(document);
                true
            }
            None => false,
        }
    }

    pub fn client(&self, id: Uuid) -> Option<&Client> {
        self.clients.get(&id)
    }

    pub fn clients(&self) -> Vec<Client> {
        let mut list: Vec<Client> = self.clients.values().cloned().collect();
        list.sort_by_key(|c| (c.created_at, c.id));
        list
    }

    // ==================== Agentes ====================

    /// Activación de mandato. Devuelve false si el nickname ya está en uso
    /// (comparación case-insensitive, es el handle de login).
    pub fn add_agent(&mut self, agent: Agent) -> bool {
        if self.agent_by_nickname(&agent.nickname).is_some() {
            log::warn!("❌ Nickname duplicado rechazado: {}", agent.nickname);
            return false;
        }
        self.agents.insert(agent.id, agent);
        true
    }

    pub fn update_agent(&mut self, agent: Agent) -> bool {
        if !self.agents.contains_key(&agent.id) {
            return false;
        }
        self.agents.insert(agent.id, agent);
        true
    }

    pub fn set_agent_status(&mut self, id: Uuid, status: AgentStatus) -> bool {
        match self.agents.get_mut(&id) {
            Some(agent) => {
                agent.status = status;
                true
            }
            None => false,
        }
    }

    pub fn agent(&self, id: Uuid) -> Option<&Agent> {
        self.agents.get(&id)
    }

    /// Lookup por nickname, case-insensitive (login y magic link)
    pub fn agent_by_nickname(&self, nickname: &str) -> Option<&Agent> {
        let needle = nickname.trim().to_lowercase();
        self.agents
            .values()
            .find(|a| a.nickname.to_lowercase() == needle)
    }

    pub fn agents(&self) -> Vec<Agent> {
        let mut list: Vec<Agent> = self.agents.values().cloned().collect();
        list.sort_by_key(|a| (a.created_at, a.id));
        list
    }

    // ==================== Contratos ====================

    /// La única transacción multi-entidad del sistema: deriva la comisión
    /// del agente referenciado (0 si el id cuelga), inicializa las fotos
    /// a vacío, inserta el contrato y marca el vehículo como Rented sea
    /// cual sea su estado previo.
    pub fn create_contract(&mut self, new: NewContract) -> Contract {
        let commission_amount = match self.agents.get(&new.agent_id) {
            Some(agent) => new.total_amount * agent.commission_rate / Decimal::ONE_HUNDRED,
            None => Decimal::ZERO,
        };

        let contract = Contract {
            id: Uuid::new_v4(),
            agent_id: new.agent_id,
            client_id: new.client_id,
            car_id: new.car_id,
            start_date: new.start_date,
            end_date: new.end_date,
            total_amount: new.total_amount,
            commission_amount,
            status: ContractStatus::Attivo,
            check_in_photos: Vec::new(),
            check_out_photos: Vec::new(),
            created_at: Utc::now(),
        };

        self.contracts.insert(contract.id, contract.clone());

        if let Some(car) = self.cars.get_mut(&new.car_id) {
            car.status = CarStatus::Rented;
        }

        log::info!(
            "📄 Contrato {} creado (comisión {})",
            contract.id,
            contract.commission_amount
        );
        contract
    }

    /// Conclusión del contrato: estado Concluso y el vehículo vuelve
    /// a estar disponible.
    pub fn complete_contract(&mut self, id: Uuid) -> bool {
        let car_id = match self.contracts.get_mut(&id) {
            Some(contract) => {
                contract.status = ContractStatus::Concluso;
                contract.car_id
            }
            None => return false,
        };
        if let Some(car) = self.cars.get_mut(&car_id) {
            car.status = CarStatus::Available;
        }
        true
    }

    /// Reemplaza una de las dos listas de fotos del contrato
    pub fn update_contract_photos(
        &mut self,
        contract_id: Uuid,
        kind: PhotoKind,
        photos: Vec<String>,
    ) -> bool {
        match self.contracts.get_mut(&contract_id) {
            Some(contract) => {
                match kind {
                    PhotoKind::CheckIn => contract.check_in_photos = photos,
                    PhotoKind::CheckOut => contract.check_out_photos = photos,
                }
                true
            }
            None => false,
        }
    }

    pub fn contract(&self, id: Uuid) -> Option<&Contract> {
        self.contracts.get(&id)
    }

    pub fn contracts(&self) -> Vec<Contract> {
        let mut list: Vec<Contract> = self.contracts.values().cloned().collect();
        list.sort_by_key(|c| (c.created_at, c.id));
        list
    }

    // ==================== Leads ====================

    pub fn add_lead(&mut self, lead: MarketingLead) {
        self.leads.insert(lead.id, lead);
    }

    pub fn add_leads(&mut self, leads: Vec<MarketingLead>) -> usize {
        let count = leads.len();
        for lead in leads {
            self.leads.insert(lead.id, lead);
        }
        count
    }

    pub fn update_lead(&mut self, lead: MarketingLead) -> bool {
        if !self.leads.contains_key(&lead.id) {
            return false;
        }
        self.leads.insert(lead.id, lead);
        true
    }

    pub fn update_lead_status(&mut self, id: Uuid, status: LeadStatus) -> bool {
        match self.leads.get_mut(&id) {
            Some(lead) => {
                lead.status = status;
                true
            }
            None => false,
        }
    }

    pub fn lead(&self, id: Uuid) -> Option<&MarketingLead> {
        self.leads.get(&id)
    }

    pub fn leads(&self) -> Vec<MarketingLead> {
        let mut list: Vec<MarketingLead> = self.leads.values().cloned().collect();
        list.sort_by_key(|l| (l.created_at, l.id));
        list
    }

    // ==================== Empresa ====================

    pub fn company(&self) -> &CompanyProfile {
        &self.company
    }

    /// Reemplazo en bloque (formulario de ajustes)
    pub fn set_company(&mut self, profile: CompanyProfile) {
        self.company = profile;
    }

    pub fn set_company_bio(&mut self, bio: String) {
        self.company.bio = Some(bio);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::car::CarCategory;
    use crate::models::client::{ClientStatus, ClientType, DEFAULT_RISK_SCORE};
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn test_car(plate: &str) -> Car {
        Car {
            id: Uuid::new_v4(),
            brand: "Fiat".to_string(),
            model: "Panda".to_string(),
            plate: plate.to_string(),
            category: CarCategory::Economy,
            price_per_day: Decimal::from(35),
            status: CarStatus::Available,
            year: 2022,
            mileage: 15_000,
            fuel_type: "Benzina".to_string(),
            transmission: "Manuale".to_string(),
            monthly_rates: None,
            features: Vec::new(),
            accessories: Vec::new(),
            created_at: Utc::now(),
        }
    }

    fn test_client(name: &str) -> Client {
        Client {
            id: Uuid::new_v4(),
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
            phone: "+39 333 0000000".to_string(),
            client_type: ClientType::Privato,
            vat_number: None,
            fiscal_code: None,
            risk_score: DEFAULT_RISK_SCORE,
            status: ClientStatus::Attivo,
            documents: Vec::new(),
            rental_history: Vec::new(),
            subagent_id: None,
            created_at: Utc::now(),
        }
    }

    fn test_agent(nickname: &str, rate: &str) -> Agent {
        Agent {
            id: Uuid::new_v4(),
            name: format!("Agente {}", nickname),
            nickname: nickname.to_string(),
            region: "Lazio".to_string(),
            commission_rate: Decimal::from_str(rate).unwrap(),
            status: AgentStatus::Attivo,
            billing: None,
            created_at: Utc::now(),
        }
    }

    fn test_lead(name: &str) -> MarketingLead {
        MarketingLead {
            id: Uuid::new_v4(),
            name: name.to_string(),
            company: name.to_string(),
            interest: "Noleggio a lungo termine".to_string(),
            status: LeadStatus::New,
            source: crate::models::lead::LeadSource::Manual,
            email: None,
            phone: None,
            location: None,
            created_at: Utc::now(),
        }
    }

    fn new_contract(agent: Uuid, client: Uuid, car: Uuid, total: i64) -> NewContract {
        NewContract {
            agent_id: agent,
            client_id: client,
            car_id: car,
            start_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 12, 31).unwrap(),
            total_amount: Decimal::from(total),
        }
    }

    #[test]
    fn contract_commission_derives_from_agent_rate() {
        let mut store = DomainStore::new();
        let agent = test_agent("mario", "12.5");
        let agent_id = agent.id;
        let client = test_client("Cliente Uno");
        let client_id = client.id;
        let car = test_car("AB123CD");
        let car_id = car.id;
        store.add_agent(agent);
        store.add_client(client);
        store.add_car(test_car("XX000XX"));
        assert!(store.add_car(car));

        let contract = store.create_contract(new_contract(agent_id, client_id, car_id, 1000));

        assert_eq!(contract.commission_amount, Decimal::from_str("125").unwrap());
        assert_eq!(contract.status, ContractStatus::Attivo);
        assert!(contract.check_in_photos.is_empty());
        assert!(contract.check_out_photos.is_empty());
    }

    #[test]
    fn contract_commission_is_zero_for_dangling_agent() {
        let mut store = DomainStore::new();
        let client = test_client("Cliente Due");
        let client_id = client.id;
        let car = test_car("EF456GH");
        let car_id = car.id;
        store.add_client(client);
        store.add_car(car);

        let contract = store.create_contract(new_contract(Uuid::new_v4(), client_id, car_id, 900));

        assert_eq!(contract.commission_amount, Decimal::ZERO);
    }

    #[test]
    fn creating_a_contract_rents_the_car_regardless_of_prior_status() {
        let mut store = DomainStore::new();
        let client = test_client("Cliente Tre");
        let client_id = client.id;
        let mut car = test_car("IJ789KL");
        car.status = CarStatus::Maintenance;
        let car_id = car.id;
        store.add_client(client);
        store.add_car(car);

        store.create_contract(new_contract(Uuid::new_v4(), client_id, car_id, 500));

        assert_eq!(store.car(car_id).unwrap().status, CarStatus::Rented);
    }

    #[test]
    fn deleting_a_client_cascades_only_its_contracts() {
        let mut store = DomainStore::new();
        let victim = test_client("Vittima");
        let victim_id = victim.id;
        let other = test_client("Altro");
        let other_id = other.id;
        let car_a = test_car("AA111AA");
        let car_a_id = car_a.id;
        let car_b = test_car("BB222BB");
        let car_b_id = car_b.id;
        store.add_client(victim);
        store.add_client(other);
        store.add_car(car_a);
        store.add_car(car_b);

        store.create_contract(new_contract(Uuid::new_v4(), victim_id, car_a_id, 100));
        store.create_contract(new_contract(Uuid::new_v4(), victim_id, car_a_id, 200));
        let kept = store.create_contract(new_contract(Uuid::new_v4(), other_id, car_b_id, 300));

        assert!(store.delete_client(victim_id));

        assert!(store.client(victim_id).is_none());
        let remaining = store.contracts();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, kept.id);
    }

    #[test]
    fn cascade_policy_none_leaves_contracts_orphaned() {
        let mut store = DomainStore::with_policy(CascadePolicy::None);
        let client = test_client("Orfano");
        let client_id = client.id;
        let car = test_car("CC333CC");
        let car_id = car.id;
        store.add_client(client);
        store.add_car(car);
        store.create_contract(new_contract(Uuid::new_v4(), client_id, car_id, 100));

        store.delete_client(client_id);

        assert_eq!(store.contracts().len(), 1);
    }

    #[test]
    fn update_car_status_round_trips_and_leaves_others_untouched() {
        let mut store = DomainStore::new();
        let car_a = test_car("DD444DD");
        let car_a_id = car_a.id;
        let car_b = test_car("EE555EE");
        let car_b_id = car_b.id;
        store.add_car(car_a);
        store.add_car(car_b);

        assert!(store.update_car_status(car_a_id, CarStatus::Maintenance));

        assert_eq!(store.car(car_a_id).unwrap().status, CarStatus::Maintenance);
        assert_eq!(store.car(car_b_id).unwrap().status, CarStatus::Available);
    }

    #[test]
    fn update_against_missing_id_is_a_silent_no_op() {
        let mut store = DomainStore::new();
        assert!(!store.update_car_status(Uuid::new_v4(), CarStatus::Rented));
        assert!(!store.set_client_risk_score(Uuid::new_v4(), 80));
        assert!(!store.update_contract_photos(Uuid::new_v4(), PhotoKind::CheckIn, vec![]));
        assert!(!store.update_lead_status(Uuid::new_v4(), LeadStatus::Contacted));
        assert!(!store.update_lead(test_lead("Fantasma")));
        assert!(!store.update_agent(test_agent("fantasma", "10")));
    }

    #[test]
    fn lead_moves_through_the_pipeline_states() {
        let mut store = DomainStore::new();
        let lead = test_lead("Mario Rossi");
        let lead_id = lead.id;
        store.add_lead(lead);

        assert!(store.update_lead_status(lead_id, LeadStatus::Contacted));
        assert_eq!(store.lead(lead_id).unwrap().status, LeadStatus::Contacted);

        assert!(store.update_lead_status(lead_id, LeadStatus::Converted));
        assert_eq!(store.lead(lead_id).unwrap().status, LeadStatus::Converted);
    }

    #[test]
    fn update_lead_and_agent_replace_by_id() {
        let mut store = DomainStore::new();
        let mut lead = test_lead("Luigi Verdi");
        let lead_id = lead.id;
        store.add_lead(lead.clone());
        lead.interest = "Furgoni".to_string();
        assert!(store.update_lead(lead));
        assert_eq!(store.lead(lead_id).unwrap().interest, "Furgoni");

        let mut agent = test_agent("giulia", "10");
        let agent_id = agent.id;
        store.add_agent(agent.clone());
        agent.commission_rate = Decimal::from_str("12.5").unwrap();
        assert!(store.update_agent(agent));
        assert_eq!(
            store.agent(agent_id).unwrap().commission_rate,
            Decimal::from_str("12.5").unwrap()
        );
    }

    #[test]
    fn duplicate_plate_is_rejected_case_insensitively() {
        let mut store = DomainStore::new();
        assert!(store.add_car(test_car("AB123CD")));
        assert!(!store.add_car(test_car("ab 123 cd")));
        assert_eq!(store.cars().len(), 1);
    }

    #[test]
    fn nickname_lookup_is_case_insensitive_and_unique() {
        let mut store = DomainStore::new();
        assert!(store.add_agent(test_agent("demo", "10")));
        assert!(!store.add_agent(test_agent("DEMO", "15")));
        assert!(store.agent_by_nickname("Demo").is_some());
        assert!(store.agent_by_nickname("ghost").is_none());
    }

    #[test]
    fn completing_a_contract_frees_the_car() {
        let mut store = DomainStore::new();
        let client = test_client("Fine Noleggio");
        let client_id = client.id;
        let car = test_car("FF666FF");
        let car_id = car.id;
        store.add_client(client);
        store.add_car(car);
        let contract = store.create_contract(new_contract(Uuid::new_v4(), client_id, car_id, 100));

        assert!(store.complete_contract(contract.id));

        assert_eq!(store.contract(contract.id).unwrap().status, ContractStatus::Concluso);
        assert_eq!(store.car(car_id).unwrap().status, CarStatus::Available);
    }

    #[test]
    fn contract_photos_replace_only_the_requested_kind() {
        let mut store = DomainStore::new();
        let client = test_client("Foto");
        let client_id = client.id;
        let car = test_car("GG777GG");
        let car_id = car.id;
        store.add_client(client);
        store.add_car(car);
        let contract = store.create_contract(new_contract(Uuid::new_v4(), client_id, car_id, 100));

        assert!(store.update_contract_photos(
            contract.id,
            PhotoKind::CheckIn,
            vec!["front.jpg".to_string(), "rear.jpg".to_string()],
        ));

        let stored = store.contract(contract.id).unwrap();
        assert_eq!(stored.check_in_photos.len(), 2);
        assert!(stored.check_out_photos.is_empty());
    }
}
